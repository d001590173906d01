use std::error::Error;

use tracing::Level;
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log targets of the workspace crates, rendered by the RFC3339 layer.
const WORKSPACE_TARGETS: &[&str] = &[
    "qna_backend",
    "api",
    "responder",
    "semantic_matcher",
    "qna_store",
    "doc_ingest",
    "session_state",
    "ai_llm_service",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file if there is one.
    dotenvy::dotenv().ok();

    let filter = ai_llm_service::telemetry::env_filter_with_level("info", Level::INFO);

    // Third-party crates (axum, hyper, sqlx) keep a plain compact format.
    let others = fmt::layer()
        .compact()
        .with_target(true)
        .with_filter(filter::filter_fn(|meta| {
            !WORKSPACE_TARGETS
                .iter()
                .any(|p| meta.target().starts_with(p))
        }));

    tracing_subscriber::registry()
        .with(filter)
        .with(ai_llm_service::telemetry::layer(WORKSPACE_TARGETS))
        .with(others)
        .try_init()?;

    api::start().await?;

    Ok(())
}
