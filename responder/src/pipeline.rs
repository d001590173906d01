use std::sync::Arc;

use doc_ingest::{is_structured_document, parse_qna_text};
use qna_store::{QnaPair, QnaSource, StoreError};
use semantic_matcher::{MatchError, SemanticMatcher, dedup_bank};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    cfg::ResponderConfig,
    completion::{CompletionProvider, error_reply},
    format::{QNA_ONLY_MESSAGE, format_matches},
    prompt::{FALLBACK_SYSTEM, build_fallback_prompt},
};

/// Inputs for one chat reply.
#[derive(Debug, Clone, Copy)]
pub struct ResponseRequest<'a> {
    pub message: &'a str,
    /// Session history before this message.
    pub history: &'a [String],
    /// Session document text (may be empty).
    pub document: &'a str,
    pub session: Option<&'a str>,
    /// Skip matching and ask the LLM directly.
    pub force_llm: bool,
}

/// Which path produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    StoreMatch,
    DocumentMatch,
    Completion,
    QnaOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseOutcome {
    pub text: String,
    /// A bank was searched and nothing scored above the threshold.
    pub no_match: bool,
    pub source: ReplySource,
}

/// Reply generator over the Q&A store, the matcher and the completion model.
pub struct Responder {
    store: Arc<dyn QnaSource>,
    matcher: Arc<SemanticMatcher>,
    completion: Arc<dyn CompletionProvider>,
    cfg: ResponderConfig,
}

impl Responder {
    pub fn new(
        store: Arc<dyn QnaSource>,
        matcher: Arc<SemanticMatcher>,
        completion: Arc<dyn CompletionProvider>,
        cfg: ResponderConfig,
    ) -> Self {
        Self {
            store,
            matcher,
            completion,
            cfg,
        }
    }

    pub fn config(&self) -> &ResponderConfig {
        &self.cfg
    }

    pub fn matcher(&self) -> &SemanticMatcher {
        &self.matcher
    }

    /// Produces the reply for one chat message.
    ///
    /// Order of attempts:
    /// 1. `force_llm` goes straight to the completion model;
    /// 2. the stored Q&A bank, when it has rows and matching succeeds;
    /// 3. a `Data:` session document, parsed back into pairs;
    /// 4. a free-text session document, via the completion model;
    /// 5. otherwise [`QNA_ONLY_MESSAGE`].
    ///
    /// Never fails: backend errors are logged and degrade to the next step,
    /// completion errors become an inline `Error: …` reply.
    #[instrument(level = "debug", skip_all, fields(session = req.session, force_llm = req.force_llm))]
    pub async fn generate_response(&self, req: ResponseRequest<'_>) -> ResponseOutcome {
        if req.force_llm {
            return self.completion_reply(&req).await;
        }

        match self.store.fetch_all().await {
            Ok(pairs) => {
                let bank = dedup_bank(pairs);
                match self.match_bank(req.message, &bank, req.session).await {
                    Ok((text, no_match)) => {
                        return ResponseOutcome {
                            text,
                            no_match,
                            source: ReplySource::StoreMatch,
                        };
                    }
                    Err(e) => warn!(error = %e, "responder: matching against store failed"),
                }
            }
            Err(StoreError::NoRows) => debug!("responder: Q&A store is empty"),
            Err(e) if e.is_unreachable() => warn!(error = %e, "responder: Q&A store unreachable"),
            Err(e) => error!(error = %e, "responder: Q&A store query failed"),
        }

        if is_structured_document(req.document) {
            let bank = dedup_bank(parse_qna_text(req.document));
            if !bank.is_empty() {
                match self.match_bank(req.message, &bank, req.session).await {
                    Ok((text, no_match)) => {
                        return ResponseOutcome {
                            text,
                            no_match,
                            source: ReplySource::DocumentMatch,
                        };
                    }
                    Err(e) => warn!(error = %e, "responder: matching against document failed"),
                }
            }
        } else if !req.document.trim().is_empty() {
            return self.completion_reply(&req).await;
        }

        ResponseOutcome {
            text: QNA_ONLY_MESSAGE.to_string(),
            no_match: false,
            source: ReplySource::QnaOnly,
        }
    }

    async fn match_bank(
        &self,
        message: &str,
        bank: &[QnaPair],
        session: Option<&str>,
    ) -> Result<(String, bool), MatchError> {
        let matches = self.matcher.find_top_matches(message, bank, session).await?;
        Ok((format_matches(&matches), matches.is_empty()))
    }

    async fn completion_reply(&self, req: &ResponseRequest<'_>) -> ResponseOutcome {
        let prompt = build_fallback_prompt(
            req.message,
            req.document,
            req.history,
            self.cfg.fallback_history_turns,
            self.cfg.fallback_max_ctx_chars,
        );

        let text = match self.completion.complete(&prompt, Some(FALLBACK_SYSTEM)).await {
            Ok(answer) => {
                info!(chars = answer.len(), "responder: completion answered");
                answer.trim().to_string()
            }
            Err(e) => {
                warn!(error = %e, "responder: completion failed");
                error_reply(&e)
            }
        };

        ResponseOutcome {
            text,
            no_match: false,
            source: ReplySource::Completion,
        }
    }
}
