use crate::access::{AccessLevel, check_access};
use crate::guard::{Destination, GuardPaths, Navigation};
use crate::services::session::SessionStore;

/// Decide whether a navigation to `destination` may proceed.
///
/// 1. Use the cached identity; if it is missing or has no role, refresh once.
/// 2. Routes without an access requirement always proceed.
/// 3. Unauthenticated users (no identity, no role, or the `notLogin` role)
///    are sent to login with the destination preserved.
/// 4. Authenticated users lacking the required level are sent to no-auth.
pub async fn guard(
    store: &dyn SessionStore,
    paths: &GuardPaths,
    destination: &Destination,
    origin: Option<&str>,
) -> Navigation {
    let mut login_user = store.current_user();

    if login_user.as_ref().and_then(|u| u.role()).is_none() {
        store.refresh_current_user().await;
        login_user = store.current_user();
    }

    let required = destination.meta.required_access();

    if !required.requires_login() {
        tracing::debug!(to = %destination.full_path, from = ?origin, "public route");
        return Navigation::Proceed;
    }

    let role = login_user.as_ref().and_then(|u| u.role());
    let Some(user) = login_user
        .as_ref()
        .filter(|_| role.is_some_and(|r| r != AccessLevel::NotLogin.as_str()))
    else {
        tracing::info!(
            to = %destination.full_path,
            from = ?origin,
            required = %required,
            "login required; redirecting"
        );
        return Navigation::RedirectTo(paths.login_redirect(&destination.full_path));
    };

    if !check_access(user, required) {
        tracing::info!(
            to = %destination.full_path,
            from = ?origin,
            required = %required,
            role = ?role,
            "insufficient access; redirecting"
        );
        return Navigation::RedirectTo(paths.no_auth.clone());
    }

    tracing::debug!(to = %destination.full_path, required = %required, "access granted");
    Navigation::Proceed
}
