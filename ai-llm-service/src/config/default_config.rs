//! Default model profiles loaded from environment variables.
//!
//! Two roles are configured, both served by a local Ollama runtime:
//!
//! - **Completion** → free-text answers for uploaded documents (fallback path)
//! - **Embedding**  → sentence embeddings for semantic question matching
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`         = provider kind (only `ollama`)
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS` = completion timeout, default 90
//! - `LLM_TEMPERATURE`  = completion temperature in `0.0..=2.0`, default 0.2
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (default `http://localhost:11434`)
//! - `OLLAMA_MODEL`                = completion model (default `llama3`)
//! - `EMBEDDING_MODEL`             = embedding model (default `all-minilm`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_non_empty, env_opt_u32, env_u64_or, validate_http_endpoint,
        validate_range_f32,
    },
};

/// Default Ollama port when neither `OLLAMA_URL` nor `OLLAMA_PORT` is set.
pub const DEFAULT_OLLAMA_PORT: u16 = 11434;
/// Completion model used when `OLLAMA_MODEL` is unset.
pub const DEFAULT_COMPLETION_MODEL: &str = "llama3";
/// Sentence-embedding model used when `EMBEDDING_MODEL` is unset.
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";
/// Completion timeout used when `LLM_TIMEOUT_SECS` is unset.
pub const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 90;
/// Completion temperature used when `LLM_TEMPERATURE` is unset.
pub const DEFAULT_COMPLETION_TEMPERATURE: f32 = 0.2;
/// Embedding timeout.
pub const EMBEDDING_TIMEOUT_SECS: u64 = 30;

/// Resolves the configured provider from `LLM_KIND`.
///
/// # Errors
/// [`ConfigError::UnsupportedProvider`] for anything other than `ollama`.
pub fn provider_from_env() -> Result<LlmProvider, AiLlmError> {
    Ok(env_non_empty("LLM_KIND")
        .unwrap_or_default()
        .parse::<LlmProvider>()?)
}

/// Resolves the Ollama endpoint from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
/// 3. `http://localhost:11434`
///
/// # Errors
///
/// - [`ConfigError::InvalidFormat`] if `OLLAMA_URL` has no http(s) scheme
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
fn ollama_endpoint() -> Result<String, AiLlmError> {
    if let Some(url) = env_non_empty("OLLAMA_URL") {
        validate_http_endpoint("OLLAMA_URL", &url)?;
        return Ok(url.trim().to_string());
    }
    if let Some(port) = env_non_empty("OLLAMA_PORT") {
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidNumber {
                var: "OLLAMA_PORT",
                reason: "expected u16 (1..=65535)",
            })?;
        return Ok(format!("http://localhost:{port}"));
    }
    Ok(format!("http://localhost:{DEFAULT_OLLAMA_PORT}"))
}

/// Parses `LLM_TEMPERATURE`; unset means [`DEFAULT_COMPLETION_TEMPERATURE`].
///
/// # Errors
///
/// - [`ConfigError::InvalidNumber`] if the value is not a float
/// - [`ConfigError::OutOfRange`] if it lies outside `0.0..=2.0`
fn parse_temperature(raw: Option<String>) -> Result<f32, AiLlmError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_COMPLETION_TEMPERATURE);
    };
    let value = raw
        .trim()
        .parse::<f32>()
        .map_err(|_| ConfigError::InvalidNumber {
            var: "LLM_TEMPERATURE",
            reason: "expected f32",
        })?;
    validate_range_f32("LLM_TEMPERATURE", value, 0.0, 2.0)?;
    Ok(value)
}

/// Constructs the **completion** profile used for free-text documents.
///
/// # Env
/// - `OLLAMA_MODEL` (optional)
/// - `LLM_MAX_TOKENS` (optional)
/// - `LLM_TIMEOUT_SECS` (optional)
/// - `LLM_TEMPERATURE` (optional)
///
/// # Defaults
/// - `temperature = Some(0.2)`
/// - `timeout_secs = Some(90)`
pub fn config_ollama_completion() -> Result<LlmModelConfig, AiLlmError> {
    let provider = provider_from_env()?;
    let endpoint = ollama_endpoint()?;
    let model = env_non_empty("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.into());
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;
    let timeout_secs = env_u64_or("LLM_TIMEOUT_SECS", DEFAULT_COMPLETION_TIMEOUT_SECS)?;
    let temperature = parse_temperature(env_non_empty("LLM_TEMPERATURE"))?;

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        max_tokens,
        temperature: Some(temperature),
        timeout_secs: Some(timeout_secs),
    })
}

/// Constructs the **embedding** profile used by the semantic matcher.
///
/// # Env
/// - `EMBEDDING_MODEL` (optional)
///
/// # Defaults
/// - `timeout_secs = Some(30)`
pub fn config_ollama_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let provider = provider_from_env()?;
    let endpoint = ollama_endpoint()?;
    let model =
        env_non_empty("EMBEDDING_MODEL").unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.into());

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        max_tokens: None,
        temperature: None,
        timeout_secs: Some(EMBEDDING_TIMEOUT_SECS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_defaults_and_bounds() {
        assert_eq!(parse_temperature(None).unwrap(), DEFAULT_COMPLETION_TEMPERATURE);
        assert_eq!(parse_temperature(Some(" 0.7 ".into())).unwrap(), 0.7);
        assert_eq!(parse_temperature(Some("2".into())).unwrap(), 2.0);

        let err = parse_temperature(Some("2.5".into())).unwrap_err();
        assert!(matches!(err, AiLlmError::Config(ConfigError::OutOfRange { .. })));
        let err = parse_temperature(Some("warm".into())).unwrap_err();
        assert!(matches!(err, AiLlmError::Config(ConfigError::InvalidNumber { .. })));
    }
}
