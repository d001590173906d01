use std::sync::Arc;

use axum::{Json, extract::State};
use axum_extra::extract::cookie::CookieJar;
use session_state::SessionState;
use tracing::debug;

use crate::{
    core::{app_state::AppState, session_cookie::current_session},
    routes::clear::clear_response::ClearResponse,
};

/// Handler: POST /clear_chat. Keeps the document, drops the history.
pub async fn clear_chat_route(State(state): State<Arc<AppState>>, jar: CookieJar) -> Json<ClearResponse> {
    if let Some(sid) = current_session(&jar) {
        state
            .sessions
            .update(sid.as_str(), Box::new(|s: &mut SessionState| s.reset_history()))
            .await;
        debug!(session = %sid, "clear_chat_route: history cleared");
    }
    Json(ClearResponse::success("Chat history cleared"))
}
