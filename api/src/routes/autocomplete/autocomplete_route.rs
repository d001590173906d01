//! GET /autocomplete - substring suggestions from the stored questions.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use qna_store::{AUTOCOMPLETE_SCAN_LIMIT, StoreError};
use tracing::{debug, warn};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::autocomplete::{
        autocomplete_request::AutocompleteQuery, autocomplete_response::AutocompleteResponse,
    },
};

/// Handler: GET /autocomplete?q=&limit=
///
/// Scans the first stored questions in store order and keeps those that
/// contain `q` (case-insensitive), up to `limit`. Store failures yield an
/// empty list; an unreachable store is not even logged.
pub async fn autocomplete_route(
    State(state): State<Arc<AppState>>,
    query: Result<Query<AutocompleteQuery>, QueryRejection>,
) -> AppResult<Json<AutocompleteResponse>> {
    let Query(params) = query?;
    let needle = params.needle();
    if needle.is_empty() {
        return Ok(Json(AutocompleteResponse {
            suggestions: Vec::new(),
        }));
    }

    let suggestions = match state.store.fetch_limited(AUTOCOMPLETE_SCAN_LIMIT).await {
        Ok(rows) => rows
            .into_iter()
            .filter(|p| p.question_contains(&needle))
            .take(params.limit())
            .collect(),
        Err(StoreError::NoRows) => Vec::new(),
        Err(e) if e.is_unreachable() => Vec::new(),
        Err(e) => {
            warn!(error = %e, "autocomplete_route: store query failed");
            Vec::new()
        }
    };

    debug!(q = %needle, hits = suggestions.len(), "autocomplete_route: done");
    Ok(Json(AutocompleteResponse { suggestions }))
}
