use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use qna_store::{DbConfig, PgQnaStore, QnaSource};
use responder::{LlmCompletion, Responder, ResponderConfig};
use semantic_matcher::{CachedEmbeddings, LlmEmbedder, MatchOptions, SemanticMatcher};
use session_state::{InMemorySessionStore, SessionState, SessionStore};
use tracing::info;

use crate::error_handler::AppResult;

pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 25 * 1024 * 1024;
pub const DEFAULT_AUTOCOMPLETE_LIMIT: usize = 10;

/// HTTP-level settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Listen address, e.g. "0.0.0.0:5000".
    pub address: String,
    /// Request body limit for uploads.
    pub upload_max_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_API_ADDRESS.to_string(),
            upload_max_bytes: DEFAULT_UPLOAD_MAX_BYTES,
        }
    }
}

impl AppConfig {
    /// Reads `API_ADDRESS` and `UPLOAD_MAX_BYTES`.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            address: std::env::var("API_ADDRESS")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(d.address),
            upload_max_bytes: std::env::var("UPLOAD_MAX_BYTES")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(d.upload_max_bytes),
        }
    }
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Stored Q&A bank (autocomplete reads it directly).
    pub store: Arc<dyn QnaSource>,
    /// Chat reply generation.
    pub responder: Arc<Responder>,
    /// History and document per session token.
    pub sessions: Arc<dyn SessionStore<SessionState>>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn QnaSource>,
        responder: Arc<Responder>,
        sessions: Arc<dyn SessionStore<SessionState>>,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            responder,
            sessions,
            config,
        }
    }

    /// Wires production collaborators from environment variables.
    ///
    /// The Postgres pool connects lazily, so the server starts while the
    /// database is down.
    pub fn from_env() -> AppResult<Self> {
        let config = AppConfig::from_env();
        let llm = Arc::new(LlmServiceProfiles::from_env()?);

        let db = DbConfig::from_env();
        info!(db = ?db, "app_state: Q&A store configured");
        let store: Arc<dyn QnaSource> = Arc::new(PgQnaStore::connect_lazy(&db));

        let matcher = SemanticMatcher::new(
            Arc::new(LlmEmbedder::new(Arc::clone(&llm))),
            Arc::new(InMemorySessionStore::<CachedEmbeddings>::new()),
            MatchOptions::from_env(),
        );
        let responder = Responder::new(
            Arc::clone(&store),
            Arc::new(matcher),
            Arc::new(LlmCompletion::new(llm)),
            ResponderConfig::from_env(),
        );

        Ok(Self::new(
            store,
            Arc::new(responder),
            Arc::new(InMemorySessionStore::<SessionState>::new()),
            config,
        ))
    }
}
