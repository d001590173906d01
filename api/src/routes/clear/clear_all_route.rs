use std::sync::Arc;

use axum::{Json, extract::State};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use crate::{
    core::{
        app_state::AppState,
        session_cookie::{clear_session, current_session},
    },
    routes::clear::clear_response::ClearResponse,
};

/// Handler: POST /clear_all
///
/// Drops history, document and cached embeddings, and expires the cookie so
/// the next request starts a new session.
pub async fn clear_all_route(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<ClearResponse>) {
    if let Some(sid) = current_session(&jar) {
        state.sessions.delete(sid.as_str()).await;
        state.responder.matcher().invalidate(sid.as_str()).await;
        info!(session = %sid, "clear_all_route: session dropped");
    }
    (clear_session(jar), Json(ClearResponse::success("All data cleared")))
}
