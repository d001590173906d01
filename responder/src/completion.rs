use std::{fmt::Display, future::Future, pin::Pin, sync::Arc};

use ai_llm_service::LlmServiceProfiles;

use crate::error::ResponderError;

/// Length limit for error reasons shown to the user.
pub const ERROR_REASON_MAX_CHARS: usize = 100;

/// Text-completion backend used for the free-text fallback.
pub trait CompletionProvider: Send + Sync {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        system: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<String, ResponderError>> + Send + 'a>>;
}

/// Completion through the `completion` profile of [`LlmServiceProfiles`].
#[derive(Clone)]
pub struct LlmCompletion {
    svc: Arc<LlmServiceProfiles>,
}

impl LlmCompletion {
    pub fn new(svc: Arc<LlmServiceProfiles>) -> Self {
        Self { svc }
    }
}

impl CompletionProvider for LlmCompletion {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        system: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<String, ResponderError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.svc.complete(prompt, system).await?) })
    }
}

/// Renders a failure as an inline chat reply: `Error: ` plus the first
/// [`ERROR_REASON_MAX_CHARS`] characters of the reason.
pub fn error_reply(err: &dyn Display) -> String {
    let reason: String = err.to_string().chars().take(ERROR_REASON_MAX_CHARS).collect();
    format!("Error: {reason}")
}
