use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::access::LoginUser;
use crate::error::AppError;

/// Identity resolved by the navigation guard for this request.
///
/// `None` on public routes visited without a session. The guard middleware
/// inserts it into request extensions; a handler mounted outside the guard
/// gets a 500 because that is a routing mistake, not a client error.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<LoginUser>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().cloned().ok_or_else(|| {
            tracing::error!(path = %parts.uri.path(), "CurrentUser requested outside the guard");
            AppError::Internal
        })
    }
}
