/// Number of results returned when the caller does not say otherwise.
pub const DEFAULT_TOP_K: usize = 3;

/// Results must score strictly above this value.
pub const DEFAULT_THRESHOLD: f32 = 0.35;

/// Ranking knobs for a single matcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    pub top_k: usize,
    pub threshold: f32,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl MatchOptions {
    /// Reads `MATCH_TOP_K` and `MATCH_THRESHOLD`, keeping defaults for unset
    /// or unparsable values.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            top_k: parse("MATCH_TOP_K", d.top_k),
            threshold: parse("MATCH_THRESHOLD", d.threshold),
        }
    }
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(dflt)
}
