use std::str::FromStr;

use crate::error_handler::ConfigError;

/// Backend used for completion and embedding requests.
///
/// Only a local Ollama runtime is supported; the enum exists so that `LLM_KIND`
/// can be validated at startup instead of failing on the first request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LlmProvider {
    /// Local Ollama runtime (`/api/generate`, `/api/embed`).
    #[default]
    Ollama,
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "ollama" => Ok(LlmProvider::Ollama),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}
