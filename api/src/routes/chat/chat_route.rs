//! POST /chat - answers one message and records the exchange.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use axum_extra::extract::cookie::CookieJar;
use responder::{NO_MATCH_MESSAGE, ResponseRequest};
use session_state::SessionState;
use tracing::debug;

use crate::{
    core::{app_state::AppState, session_cookie::ensure_session},
    error_handler::AppResult,
    middleware_layer::request_id::request_id_of,
    routes::chat::{chat_request::ChatRequest, chat_response::ChatResponse},
};

/// Handler: POST /chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:5000/chat \
///   -H 'content-type: application/json' \
///   -d '{"message":"What is the capital of France?"}'
/// ```
pub async fn chat_route(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<(CookieJar, Json<ChatResponse>)> {
    let Json(body) = payload?;
    let (jar, sid) = ensure_session(jar);
    let request_id = request_id_of(&headers);

    debug!(
        request_id = %request_id,
        session = %sid,
        force_llm = body.force_llm,
        "chat_route: start"
    );

    let snapshot = state.sessions.get(sid.as_str()).await;
    let existed = snapshot.is_some();
    let session = snapshot.unwrap_or_default();

    let outcome = state
        .responder
        .generate_response(ResponseRequest {
            message: &body.message,
            history: &session.history,
            document: &session.document_text,
            session: Some(sid.as_str()),
            force_llm: body.force_llm,
        })
        .await;

    // The session may have changed while the reply was generated: record the
    // exchange on the current value, and never bring back a cleared session.
    let cap = state.responder.config().max_history_items;
    let human = format!("Human: {}", body.message);
    let ai = format!("AI: {}", outcome.text);
    let record = {
        let (human, ai) = (human.clone(), ai.clone());
        Box::new(move |s: &mut SessionState| {
            s.push_turn(human, cap);
            s.push_turn(ai, cap);
        })
    };
    let full_history = if existed {
        match state.sessions.update(sid.as_str(), record).await {
            Some(updated) => updated.history,
            None => {
                debug!(
                    request_id = %request_id,
                    session = %sid,
                    "chat_route: session cleared mid-request"
                );
                let mut detached = session;
                detached.push_turn(human, cap);
                detached.push_turn(ai, cap);
                detached.history
            }
        }
    } else {
        state
            .sessions
            .upsert(sid.as_str(), SessionState::default(), record)
            .await
            .history
    };

    debug!(
        request_id = %request_id,
        source = ?outcome.source,
        no_match = outcome.no_match,
        "chat_route: answered"
    );

    Ok((
        jar,
        Json(ChatResponse {
            no_qna_match_message: outcome.no_match.then(|| NO_MATCH_MESSAGE.to_string()),
            no_qna_match: outcome.no_match,
            response: outcome.text,
            full_history,
            last_question: body.message,
        }),
    ))
}
