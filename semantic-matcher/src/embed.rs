use std::{future::Future, pin::Pin, sync::Arc};

use ai_llm_service::LlmServiceProfiles;

use crate::errors::MatchError;

/// Provider interface for sentence embeddings.
///
/// Implement this trait to plug in another backend (remote API, local ONNX model).
/// Async because real providers perform HTTP requests.
pub trait EmbeddingsProvider: Send + Sync {
    /// Embeds every input, returning vectors in input order.
    fn embed_many<'a>(
        &'a self,
        inputs: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, MatchError>> + Send + 'a>>;
}

/// Embeddings via the shared LLM service (Ollama embedding profile).
#[derive(Clone)]
pub struct LlmEmbedder {
    svc: Arc<LlmServiceProfiles>,
}

impl LlmEmbedder {
    pub fn new(svc: Arc<LlmServiceProfiles>) -> Self {
        Self { svc }
    }
}

impl EmbeddingsProvider for LlmEmbedder {
    fn embed_many<'a>(
        &'a self,
        inputs: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, MatchError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.svc.embed_many(inputs).await?) })
    }
}

#[cfg(test)]
mod tests {
    use ai_llm_service::{LlmModelConfig, LlmProvider};

    use super::*;

    fn cfg(model: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: model.into(),
            endpoint: "http://127.0.0.1:9".into(),
            max_tokens: None,
            temperature: None,
            timeout_secs: Some(1),
        }
    }

    #[tokio::test]
    async fn llm_embedder_works_behind_the_trait_object() {
        let svc = LlmServiceProfiles::new(cfg("llama3"), cfg("all-minilm"), 2).unwrap();
        let embedder: Arc<dyn EmbeddingsProvider> = Arc::new(LlmEmbedder::new(Arc::new(svc)));
        // No inputs means no request goes out.
        let out = embedder.embed_many(&[]).await.unwrap();
        assert!(out.is_empty());
    }
}
