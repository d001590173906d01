use axum::Json;
use serde_json::{Value, json};

/// Handler: GET /health
pub async fn health_route() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
