//! Local language-model access for the Q&A assistant.
//!
//! Two logical profiles are exposed through [`service_profiles::LlmServiceProfiles`]:
//! - **completion**: free-text answers for documents that are not Q&A banks;
//! - **embedding**: sentence embeddings for semantic question matching.
//!
//! Both are served by a local Ollama runtime.

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::{AiLlmError, ConfigError};
pub use service_profiles::LlmServiceProfiles;
