use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Landing page for authenticated users that lack the required access level.
pub async fn no_auth() -> impl IntoResponse {
    (StatusCode::FORBIDDEN, Json(json!({"page": "noAuth"})))
}
