pub mod orders;
pub mod products;

use axum::{http::StatusCode, Json};
use serde_json::json;

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "service": "catalog-service" })))
}
