//! Shared LLM service with two active profiles: `completion` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - One HTTP client per profile, each with the profile's own timeout.
//! - Batch embeddings are split into chunks and sent with bounded concurrency.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::LlmServiceProfiles;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let svc = Arc::new(LlmServiceProfiles::from_env()?);
//!
//!     let txt = svc.complete("Summarize: Rust is a systems language.", None).await?;
//!     println!("COMPLETION: {txt}");
//!
//!     let emb = svc.embed_many(&["Ferris".to_string()]).await?;
//!     println!("Embedding dim = {}", emb[0].len());
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info};

use crate::{
    config::{
        default_config::{config_ollama_completion, config_ollama_embedding},
        llm_model_config::LlmModelConfig,
    },
    error_handler::{AiLlmError, env_u64_or},
    services::ollama_service::OllamaService,
};

/// Inputs per `/api/embed` request.
const EMBED_CHUNK: usize = 32;

/// Default number of embedding requests in flight.
pub const DEFAULT_EMBEDDING_CONCURRENCY: usize = 4;

/// Shared service that manages the **completion** and **embedding** profiles.
#[derive(Debug)]
pub struct LlmServiceProfiles {
    completion: Arc<OllamaService>,
    embedding: Arc<OllamaService>,

    embedding_concurrency: usize,
}

impl LlmServiceProfiles {
    /// Creates a new service with two profiles.
    ///
    /// - `completion`: model used for free-text answers.
    /// - `embedding`: model used for sentence embeddings.
    /// - `embedding_concurrency`: max embed requests in flight (`0` is treated as `1`).
    pub fn new(
        completion: LlmModelConfig,
        embedding: LlmModelConfig,
        embedding_concurrency: usize,
    ) -> Result<Self, AiLlmError> {
        info!(
            completion_model = %completion.model,
            embedding_model = %embedding.model,
            endpoint = %completion.endpoint,
            "LLM service profiles initialized"
        );

        let completion_cli = Arc::new(OllamaService::new(completion)?);
        let embedding_cli = Arc::new(OllamaService::new(embedding)?);

        Ok(Self {
            completion: completion_cli,
            embedding: embedding_cli,
            embedding_concurrency: embedding_concurrency.max(1),
        })
    }

    /// Builds both profiles from environment variables.
    ///
    /// See [`crate::config::default_config`] for the variables read;
    /// `EMBEDDING_CONCURRENCY` controls batch parallelism.
    pub fn from_env() -> Result<Self, AiLlmError> {
        let concurrency = env_u64_or(
            "EMBEDDING_CONCURRENCY",
            DEFAULT_EMBEDDING_CONCURRENCY as u64,
        )? as usize;
        Self::new(
            config_ollama_completion()?,
            config_ollama_embedding()?,
            concurrency,
        )
    }

    /// Generates text using the **completion** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if generation fails or times out.
    pub async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        Ok(self.completion.generate(prompt, system).await?)
    }

    /// Computes embeddings for many inputs, preserving input order.
    pub async fn embed_many(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, AiLlmError> {
        debug!(
            inputs = inputs.len(),
            concurrency = self.embedding_concurrency,
            "embedding batch"
        );
        // Request futures must own their inputs; callers box this future as `Send`.
        let chunks: Vec<Vec<String>> = inputs.chunks(EMBED_CHUNK).map(<[String]>::to_vec).collect();
        let cli = Arc::clone(&self.embedding);
        let batches: Vec<Vec<Vec<f32>>> = stream::iter(chunks)
            .map(move |chunk| {
                let cli = Arc::clone(&cli);
                async move { cli.embed_batch(&chunk).await }
            })
            .buffered(self.embedding_concurrency)
            .try_collect()
            .await?;
        Ok(batches.into_iter().flatten().collect())
    }
}
