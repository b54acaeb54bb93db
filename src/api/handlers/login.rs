/*
 * Responsibility
 * - GET <login path>?redirect=<遷移先>
 * - ログイン後に戻る先 (redirect) をクライアントに返すだけ。ログイン処理自体は外部
 */
use axum::{Json, extract::Query};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub redirect: Option<String>,
}

pub async fn login(Query(query): Query<LoginQuery>) -> Result<Json<Value>, AppError> {
    // Only same-site paths; `//host` would be protocol-relative.
    if let Some(redirect) = query.redirect.as_deref() {
        if !redirect.starts_with('/') || redirect.starts_with("//") {
            return Err(AppError::bad_request(
                "INVALID_REDIRECT",
                "redirect must be a path on this site",
            ));
        }
    }

    Ok(Json(json!({
        "page": "login",
        "redirect": query.redirect,
    })))
}
