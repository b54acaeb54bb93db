/*
 * Responsibility
 * - guard を通過したページ遷移の着地点 (fallback)
 * - どのページに着地したか と 現在のユーザーを返す
 */
use axum::{Json, http::Uri};
use serde_json::{Value, json};

use crate::api::extractors::CurrentUser;

pub async fn page(uri: Uri, CurrentUser(user): CurrentUser) -> Json<Value> {
    Json(json!({
        "page": uri.path(),
        "user": user,
    }))
}
