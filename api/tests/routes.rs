//! Router tests against in-memory fakes (no Postgres or Ollama needed).

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use api::{AppConfig, AppState, SESSION_COOKIE, create_app};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use qna_store::{BoxFuture, QnaPair, QnaSource, StoreError};
use responder::{CompletionProvider, Responder, ResponderConfig, ResponderError};
use semantic_matcher::{
    CachedEmbeddings, EmbeddingsProvider, MatchError, MatchOptions, SemanticMatcher,
};
use serde_json::Value;
use session_state::{InMemorySessionStore, SessionState};
use tower::util::ServiceExt; // for `oneshot`

enum FakeStore {
    Rows(Vec<QnaPair>),
    Offline,
}

impl QnaSource for FakeStore {
    fn fetch_all<'a>(&'a self) -> BoxFuture<'a, Result<Vec<QnaPair>, StoreError>> {
        Box::pin(async move {
            match self {
                FakeStore::Rows(rows) if rows.is_empty() => Err(StoreError::NoRows),
                FakeStore::Rows(rows) => Ok(rows.clone()),
                FakeStore::Offline => Err(StoreError::Unreachable(sqlx::Error::PoolTimedOut)),
            }
        })
    }

    fn fetch_limited<'a>(&'a self, limit: i64) -> BoxFuture<'a, Result<Vec<QnaPair>, StoreError>> {
        Box::pin(async move {
            match self {
                FakeStore::Rows(rows) => Ok(rows.iter().take(limit as usize).cloned().collect()),
                FakeStore::Offline => Err(StoreError::Unreachable(sqlx::Error::PoolTimedOut)),
            }
        })
    }
}

const VOCAB: [&str; 6] = ["capital", "france", "rust", "borrow", "weather", "x"];

/// Bag-of-words vectors over a tiny vocabulary.
struct WordEmbedder;

impl EmbeddingsProvider for WordEmbedder {
    fn embed_many<'a>(
        &'a self,
        inputs: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, MatchError>> + Send + 'a>> {
        Box::pin(async move {
            Ok(inputs
                .iter()
                .map(|t| {
                    let words: Vec<String> = t
                        .to_lowercase()
                        .split(|c: char| !c.is_alphanumeric())
                        .map(str::to_owned)
                        .collect();
                    VOCAB
                        .iter()
                        .map(|v| if words.iter().any(|w| w == v) { 1.0 } else { 0.0 })
                        .collect()
                })
                .collect())
        })
    }
}

/// Fixed answer, optionally after a delay to widen race windows.
struct EchoCompletion {
    delay: Duration,
}

impl CompletionProvider for EchoCompletion {
    fn complete<'a>(
        &'a self,
        _prompt: &'a str,
        _system: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<String, ResponderError>> + Send + 'a>> {
        Box::pin(async move {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok("from the model".to_string())
        })
    }
}

fn app(store: FakeStore) -> Router {
    app_with_delay(store, Duration::ZERO)
}

fn app_with_delay(store: FakeStore, delay: Duration) -> Router {
    let store: Arc<dyn QnaSource> = Arc::new(store);
    let matcher = SemanticMatcher::new(
        Arc::new(WordEmbedder),
        Arc::new(InMemorySessionStore::<CachedEmbeddings>::new()),
        MatchOptions::default(),
    );
    let responder = Responder::new(
        Arc::clone(&store),
        Arc::new(matcher),
        Arc::new(EchoCompletion { delay }),
        ResponderConfig::default(),
    );
    let state = AppState::new(
        store,
        Arc::new(responder),
        Arc::new(InMemorySessionStore::<SessionState>::new()),
        AppConfig::default(),
    );
    create_app(Arc::new(state))
}

fn bank() -> FakeStore {
    FakeStore::Rows(vec![
        QnaPair::new("What is the capital of France?", "Paris"),
        QnaPair::new("How does the Rust borrow checker work?", "Ownership"),
        QnaPair::new("What is the weather like?", "Sunny"),
    ])
}

fn chat_request(message: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, format!("{SESSION_COOKIE}={c}"));
    }
    let body = serde_json::json!({ "message": message }).to_string();
    builder.body(Body::from(body)).unwrap()
}

fn multipart_request(parts: &[(&str, Option<&str>, &str)], cookie: Option<&str>) -> Request<Body> {
    let parts: Vec<(&str, Option<&str>, &[u8])> = parts
        .iter()
        .map(|(name, filename, content)| (*name, *filename, content.as_bytes()))
        .collect();
    multipart_bytes_request(&parts, cookie)
}

fn multipart_bytes_request(
    parts: &[(&str, Option<&str>, &[u8])],
    cookie: Option<&str>,
) -> Request<Body> {
    const BOUNDARY: &str = "qna-test-boundary";
    let mut body: Vec<u8> = Vec::new();
    for (name, filename, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let disposition = match filename {
            Some(f) => format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            ),
            None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"),
        };
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, format!("{SESSION_COOKIE}={c}"));
    }
    builder.body(Body::from(body)).unwrap()
}

fn session_cookie(res: &Response) -> Option<String> {
    res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| v.strip_prefix(&format!("{SESSION_COOKIE}=")).map(str::to_owned))
        .map(|v| v.split(';').next().unwrap_or_default().to_string())
}

async fn json_body(res: Response) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn chat_matches_store_and_sets_cookie() {
    let res = app(bank())
        .oneshot(chat_request("capital of france", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let token = session_cookie(&res).expect("session cookie set");
    assert!(!token.is_empty());

    let body = json_body(res).await;
    assert!(body["response"].as_str().unwrap().contains("Paris"));
    assert_eq!(body["no_qna_match"], false);
    assert_eq!(body["last_question"], "capital of france");
    assert_eq!(body["full_history"].as_array().unwrap().len(), 2);
    assert_eq!(body["full_history"][0], "Human: capital of france");
}

#[tokio::test]
async fn unmatched_question_offers_llm_retry() {
    let res = app(bank())
        .oneshot(chat_request("tell me a joke", None))
        .await
        .unwrap();
    let body = json_body(res).await;
    assert_eq!(body["no_qna_match"], true);
    assert_eq!(
        body["no_qna_match_message"],
        "No relevant Q&A pairs found in the database. Try rephrasing your question."
    );
}

#[tokio::test]
async fn clear_all_then_chat_starts_fresh_session() {
    let app = app(bank());

    let first = app
        .clone()
        .oneshot(chat_request("capital of france", None))
        .await
        .unwrap();
    let old_token = session_cookie(&first).unwrap();

    let second = app
        .clone()
        .oneshot(chat_request("rust borrow", Some(&old_token)))
        .await
        .unwrap();
    assert_eq!(json_body(second).await["full_history"].as_array().unwrap().len(), 4);

    let cleared = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/clear_all")
                .header(header::COOKIE, format!("{SESSION_COOKIE}={old_token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(session_cookie(&cleared).as_deref(), Some(""));
    let body = json_body(cleared).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "All data cleared");

    // The browser dropped the expired cookie.
    let next = app
        .oneshot(chat_request("capital of france", None))
        .await
        .unwrap();
    let new_token = session_cookie(&next).unwrap();
    assert_ne!(new_token, old_token);
    let body = json_body(next).await;
    assert_eq!(body["full_history"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn reusing_cleared_token_has_no_history() {
    let app = app(bank());
    let first = app
        .clone()
        .oneshot(chat_request("capital of france", None))
        .await
        .unwrap();
    let token = session_cookie(&first).unwrap();

    let clear = Request::builder()
        .method(Method::POST)
        .uri("/clear_chat")
        .header(header::COOKIE, format!("{SESSION_COOKIE}={token}"))
        .body(Body::empty())
        .unwrap();
    let body = json_body(app.clone().oneshot(clear).await.unwrap()).await;
    assert_eq!(body["message"], "Chat history cleared");

    let again = app
        .oneshot(chat_request("capital of france", Some(&token)))
        .await
        .unwrap();
    assert_eq!(json_body(again).await["full_history"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn autocomplete_finds_question_by_substring() {
    let req = Request::builder()
        .uri("/autocomplete?q=capital")
        .body(Body::empty())
        .unwrap();
    let res = app(bank()).oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["question"], "What is the capital of France?");
    assert_eq!(suggestions[0]["answer"], "Paris");
}

#[tokio::test]
async fn autocomplete_respects_limit_and_empty_query() {
    let app = app(bank());
    let limited = Request::builder()
        .uri("/autocomplete?q=WHAT&limit=1")
        .body(Body::empty())
        .unwrap();
    let body = json_body(app.clone().oneshot(limited).await.unwrap()).await;
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 1);

    let empty = Request::builder()
        .uri("/autocomplete?q=%20")
        .body(Body::empty())
        .unwrap();
    let body = json_body(app.oneshot(empty).await.unwrap()).await;
    assert_eq!(body, serde_json::json!({ "suggestions": [] }));
}

#[tokio::test]
async fn autocomplete_with_offline_store_is_empty_ok() {
    let req = Request::builder()
        .uri("/autocomplete?q=capital")
        .body(Body::empty())
        .unwrap();
    let res = app(FakeStore::Offline).oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await, serde_json::json!({ "suggestions": [] }));
}

#[tokio::test]
async fn upload_two_column_csv_becomes_data_document() {
    let req = multipart_request(&[("file", Some("bank.csv"), "What is X?,X is Y\n")], None);
    let res = app(FakeStore::Offline).oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(session_cookie(&res).is_some());

    let body = json_body(res).await;
    let content = body["content"].as_str().unwrap();
    assert!(content.starts_with("Data:"));
    assert!(content.contains("Q: What is X?"));
    assert!(content.contains("A: X is Y"));
    assert_eq!(body["chatHistory"], serde_json::json!([]));
}

#[tokio::test]
async fn offline_store_answers_from_uploaded_bank() {
    let app = app(FakeStore::Offline);
    let upload = multipart_request(&[("file", Some("bank.csv"), "What is X?,X is Y\n")], None);
    let res = app.clone().oneshot(upload).await.unwrap();
    let token = session_cookie(&res).unwrap();

    let res = app
        .oneshot(chat_request("what is x", Some(&token)))
        .await
        .unwrap();
    let body = json_body(res).await;
    assert!(body["response"].as_str().unwrap().contains("X is Y"));
}

#[tokio::test]
async fn upload_xlsx_bank_answers_chat() {
    let app = app(FakeStore::Offline);
    let xlsx: &[u8] = include_bytes!("../../doc-ingest/tests/fixtures/bank.xlsx");
    let upload = multipart_bytes_request(&[("file", Some("bank.xlsx"), xlsx)], None);
    let res = app.clone().oneshot(upload).await.unwrap();
    let token = session_cookie(&res).unwrap();
    let content = json_body(res).await["content"].as_str().unwrap().to_string();
    assert!(content.starts_with("Data:\nQ: What is X?\nA: X is Y\n"));

    let res = app
        .oneshot(chat_request("what is x", Some(&token)))
        .await
        .unwrap();
    assert!(json_body(res).await["response"].as_str().unwrap().contains("X is Y"));
}

#[tokio::test]
async fn upload_during_slow_chat_is_kept() {
    let app = app_with_delay(FakeStore::Offline, Duration::from_millis(300));
    let notes = multipart_request(&[("file", Some("notes.txt"), "meeting notes")], None);
    let token = session_cookie(&app.clone().oneshot(notes).await.unwrap()).unwrap();

    // Free-text document: this chat waits on the model.
    let slow_chat = tokio::spawn(app.clone().oneshot(chat_request("summarise", Some(&token))));
    tokio::time::sleep(Duration::from_millis(50)).await;

    let bank = multipart_request(&[("file", Some("bank.csv"), "What is X?,X is Y\n")], Some(&token));
    let res = app.clone().oneshot(bank).await.unwrap();
    assert!(json_body(res).await["content"].as_str().unwrap().starts_with("Data:"));

    let res = slow_chat.await.unwrap().unwrap();
    let body = json_body(res).await;
    assert_eq!(body["response"], "from the model");
    assert_eq!(body["full_history"].as_array().unwrap().len(), 2);

    let res = app
        .oneshot(chat_request("what is x", Some(&token)))
        .await
        .unwrap();
    let body = json_body(res).await;
    assert!(body["response"].as_str().unwrap().contains("X is Y"));
    assert_eq!(body["full_history"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn clear_all_during_slow_chat_is_not_undone() {
    let app = app_with_delay(FakeStore::Offline, Duration::from_millis(300));
    let notes = multipart_request(&[("file", Some("notes.txt"), "meeting notes")], None);
    let token = session_cookie(&app.clone().oneshot(notes).await.unwrap()).unwrap();

    let slow_chat = tokio::spawn(app.clone().oneshot(chat_request("summarise", Some(&token))));
    tokio::time::sleep(Duration::from_millis(50)).await;

    let clear = Request::builder()
        .method(Method::POST)
        .uri("/clear_all")
        .header(header::COOKIE, format!("{SESSION_COOKIE}={token}"))
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.clone().oneshot(clear).await.unwrap().status(), StatusCode::OK);

    let res = slow_chat.await.unwrap().unwrap();
    assert_eq!(json_body(res).await["response"], "from the model");

    // A client that still sends the old token finds neither document nor history.
    let res = app
        .oneshot(chat_request("summarise", Some(&token)))
        .await
        .unwrap();
    let body = json_body(res).await;
    assert_ne!(body["response"], "from the model");
    assert_eq!(body["full_history"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn free_text_document_goes_to_the_model() {
    let app = app(FakeStore::Offline);
    let upload = multipart_request(&[("file", Some("notes.txt"), "meeting notes")], None);
    let res = app.clone().oneshot(upload).await.unwrap();
    let token = session_cookie(&res).unwrap();
    assert_eq!(
        json_body(res).await["content"],
        "--- notes.txt ---\nmeeting notes"
    );

    let res = app
        .oneshot(chat_request("summarise", Some(&token)))
        .await
        .unwrap();
    assert_eq!(json_body(res).await["response"], "from the model");
}

#[tokio::test]
async fn upload_rejections_are_reported_in_band() {
    let app = app(bank());

    let bad_type = multipart_request(&[("file", Some("run.exe"), "MZ")], None);
    let res = app.clone().oneshot(bad_type).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await["error"], "File type not allowed");

    let no_name = multipart_request(&[("file", Some(""), "x")], None);
    let body = json_body(app.clone().oneshot(no_name).await.unwrap()).await;
    assert_eq!(body["error"], "No selected file");

    let no_file = multipart_request(&[("action", None, "keep")], None);
    let body = json_body(app.oneshot(no_file).await.unwrap()).await;
    assert_eq!(body["error"], "No file part");
}

#[tokio::test]
async fn upload_keep_preserves_history() {
    let app = app(bank());
    let res = app
        .clone()
        .oneshot(chat_request("capital of france", None))
        .await
        .unwrap();
    let token = session_cookie(&res).unwrap();

    let keep = multipart_request(
        &[("file", Some("n.md"), "# notes"), ("action", None, "keep")],
        Some(&token),
    );
    let body = json_body(app.clone().oneshot(keep).await.unwrap()).await;
    assert_eq!(body["chatHistory"].as_array().unwrap().len(), 2);

    let replace = multipart_request(&[("file", Some("n.md"), "# notes")], Some(&token));
    let body = json_body(app.oneshot(replace).await.unwrap()).await;
    assert_eq!(body["chatHistory"], serde_json::json!([]));
}

#[tokio::test]
async fn malformed_chat_body_is_bad_request() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"msg": 1}"#))
        .unwrap();
    let res = app(bank()).oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn health_is_ok_and_request_id_is_echoed() {
    let req = Request::builder()
        .uri("/health")
        .header("x-request-id", "abc")
        .body(Body::empty())
        .unwrap();
    let res = app(FakeStore::Offline).oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-request-id"], "abc");
    assert_eq!(json_body(res).await, serde_json::json!({ "status": "ok" }));
}
