//! Runtime configuration loaded from environment variables.

use session_state::DEFAULT_MAX_HISTORY_ITEMS;

pub const DEFAULT_FALLBACK_MAX_CTX_CHARS: usize = 8000;
pub const DEFAULT_FALLBACK_HISTORY_TURNS: usize = 6;

/// Knobs for reply generation. All fields have defaults via `from_env`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponderConfig {
    /// History entries kept per session (`0` keeps everything).
    pub max_history_items: usize,
    /// Character budget for the document excerpt in fallback prompts.
    pub fallback_max_ctx_chars: usize,
    /// Most recent history entries copied into fallback prompts.
    pub fallback_history_turns: usize,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            max_history_items: DEFAULT_MAX_HISTORY_ITEMS,
            fallback_max_ctx_chars: DEFAULT_FALLBACK_MAX_CTX_CHARS,
            fallback_history_turns: DEFAULT_FALLBACK_HISTORY_TURNS,
        }
    }
}

impl ResponderConfig {
    /// Reads `MAX_HISTORY_ITEMS`, `FALLBACK_MAX_CTX_CHARS` and
    /// `FALLBACK_HISTORY_TURNS`; unset or unparsable values keep defaults.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            max_history_items: parse("MAX_HISTORY_ITEMS", d.max_history_items),
            fallback_max_ctx_chars: parse("FALLBACK_MAX_CTX_CHARS", d.fallback_max_ctx_chars),
            fallback_history_turns: parse("FALLBACK_HISTORY_TURNS", d.fallback_history_turns),
        }
    }
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(dflt)
}
