//! Navigation guard → router integration.
//!
//! Responsibility:
//! - session cookie / 遷移先 / 遷移元 をリクエストから組み立てて `guard` を呼ぶ
//! - 判定結果の副作用を実行する (Proceed → 次の handler, RedirectTo → 303)
//! - refresh で得た identity を SessionRegistry に書き戻す
//! - handler には `CurrentUser` を extensions 経由で渡す

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};

use crate::api::extractors::CurrentUser;
use crate::guard::{self, Destination, Navigation};
use crate::services::session::{SessionContext, SessionStore};
use crate::state::AppState;

/// Put every route of `router` behind the navigation guard.
///
/// The login and no-auth pages must stay outside, otherwise redirects loop.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, guard_middleware))
}

async fn guard_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let uri = req.uri();
    let full_path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let destination = Destination::new(full_path, state.routes.resolve(uri.path()));

    let origin = referer_path(req.headers());
    let session_id = session_cookie(req.headers(), &state.session_cookie_name);

    let cached = match session_id.as_deref() {
        Some(sid) => state.sessions.get(sid).await,
        None => None,
    };

    let ctx = SessionContext::new(session_id, cached, state.login_users.clone());

    let navigation = guard::guard(&ctx, &state.guard_paths, &destination, origin.as_deref()).await;

    if ctx.refreshed() {
        if let Some(sid) = ctx.session_id() {
            state.sessions.put(sid, ctx.current_user()).await;
        }
    }

    match navigation {
        Navigation::Proceed => {
            req.extensions_mut().insert(CurrentUser(ctx.current_user()));
            next.run(req).await
        }
        Navigation::RedirectTo(path) => Redirect::to(&path).into_response(),
    }
}

/// Value of the cookie named `name`, across all `Cookie` headers.
fn session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn referer_path(headers: &HeaderMap) -> Option<String> {
    let referer = headers.get(header::REFERER)?.to_str().ok()?;
    let url = url::Url::parse(referer).ok()?;
    Some(url.path().to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn finds_session_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark; SESSION=abc"));

        assert_eq!(session_cookie(&headers, "SESSION").as_deref(), Some("abc"));
        assert_eq!(session_cookie(&headers, "OTHER"), None);
    }

    #[test]
    fn empty_session_cookie_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("SESSION="));

        assert_eq!(session_cookie(&headers, "SESSION"), None);
    }

    #[test]
    fn referer_is_reduced_to_path() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::REFERER,
            HeaderValue::from_static("https://example.com/questions?page=2"),
        );

        assert_eq!(referer_path(&headers).as_deref(), Some("/questions"));

        headers.insert(header::REFERER, HeaderValue::from_static("not a url"));
        assert_eq!(referer_path(&headers), None);
    }
}
