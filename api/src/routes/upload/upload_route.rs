//! POST /upload - replaces the session document with uploaded file text.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::HeaderMap,
};
use axum_extra::extract::cookie::CookieJar;
use doc_ingest::{ExtractedFile, IngestError, combine_uploads, extract_file, is_allowed};
use responder::error_reply;
use session_state::SessionState;
use tracing::{debug, info, warn};

use crate::{
    core::{app_state::AppState, session_cookie::ensure_session},
    error_handler::AppResult,
    middleware_layer::request_id::request_id_of,
    routes::upload::upload_response::{
        FILE_TYPE_NOT_ALLOWED, NO_FILE_PART, NO_SELECTED_FILE, UploadResponse,
    },
};

/// Form value of `action` that keeps the chat history.
const ACTION_KEEP: &str = "keep";

/// Handler: POST /upload (multipart: one or more `file` parts, optional `action`)
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:5000/upload \
///   -F file=@bank.xlsx -F action=keep
/// ```
pub async fn upload_route(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(CookieJar, Json<UploadResponse>)> {
    let request_id = request_id_of(&headers).to_string();

    let mut multipart = match multipart {
        Ok(m) => m,
        Err(e) => {
            debug!(request_id = %request_id, error = %e, "upload_route: not a multipart body");
            return Ok((jar, Json(UploadResponse::failed(NO_FILE_PART))));
        }
    };

    let mut files: Vec<(String, Bytes)> = Vec::new();
    let mut saw_file_part = false;
    let mut action: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let part = field.name().map(str::to_owned);
        match part.as_deref() {
            Some("file") => {
                saw_file_part = true;
                let name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                files.push((name, data));
            }
            Some("action") => action = Some(field.text().await?),
            _ => {}
        }
    }

    if !saw_file_part {
        return Ok((jar, Json(UploadResponse::failed(NO_FILE_PART))));
    }
    files.retain(|(name, _)| !name.is_empty());
    if files.is_empty() {
        return Ok((jar, Json(UploadResponse::failed(NO_SELECTED_FILE))));
    }
    if let Some((name, _)) = files.iter().find(|(name, _)| !is_allowed(name)) {
        info!(request_id = %request_id, file = %name, "upload_route: file type rejected");
        return Ok((jar, Json(UploadResponse::failed(FILE_TYPE_NOT_ALLOWED))));
    }

    let extracted = match extract_all(files).await {
        Ok(v) => v,
        Err(reason) => {
            warn!(request_id = %request_id, error = %reason, "upload_route: extraction failed");
            return Ok((jar, Json(UploadResponse::failed(reason))));
        }
    };
    let content = combine_uploads(&extracted);

    let (jar, sid) = ensure_session(jar);
    let keep_history = action.as_deref() == Some(ACTION_KEEP);
    let document = content.clone();
    let session = state
        .sessions
        .upsert(
            sid.as_str(),
            SessionState::default(),
            Box::new(move |s: &mut SessionState| {
                if !keep_history {
                    s.reset_history();
                }
                s.replace_document(document);
            }),
        )
        .await;
    let chat_history = session.history;
    state.responder.matcher().invalidate(sid.as_str()).await;

    info!(
        request_id = %request_id,
        session = %sid,
        files = extracted.len(),
        chars = content.chars().count(),
        "upload_route: document stored"
    );

    Ok((
        jar,
        Json(UploadResponse::Loaded {
            content,
            chat_history,
        }),
    ))
}

/// Runs extraction on the blocking pool; errors come back as the reply text.
async fn extract_all(files: Vec<(String, Bytes)>) -> Result<Vec<ExtractedFile>, String> {
    let joined = tokio::task::spawn_blocking(move || {
        files
            .iter()
            .map(|(name, data)| extract_file(name, data))
            .collect::<Result<Vec<_>, IngestError>>()
    })
    .await;

    match joined {
        Ok(Ok(v)) => Ok(v),
        Ok(Err(e)) => Err(error_reply(&e)),
        Err(e) => Err(error_reply(&e)),
    }
}
