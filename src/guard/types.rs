/*
 * Responsibility
 * - guard の入出力の型 (契約)
 *   - RouteMeta / Destination: 遷移先ルートとそのメタデータ
 *   - Navigation: guard の判定結果 (Proceed / RedirectTo)
 *   - GuardPaths: リダイレクト先 (login / noAuth)
 */
use crate::access::AccessLevel;

/// Metadata declared on a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteMeta {
    /// `None` means no login required.
    pub access: Option<AccessLevel>,
}

impl RouteMeta {
    pub fn requiring(access: AccessLevel) -> Self {
        Self {
            access: Some(access),
        }
    }

    pub fn required_access(&self) -> AccessLevel {
        self.access.unwrap_or_default()
    }
}

/// The route a navigation is heading to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Path plus query string, exactly as requested.
    pub full_path: String,
    pub meta: RouteMeta,
}

impl Destination {
    pub fn new(full_path: impl Into<String>, meta: RouteMeta) -> Self {
        Self {
            full_path: full_path.into(),
            meta,
        }
    }
}

/// Outcome of a navigation guard run. Exactly one per navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    RedirectTo(String),
}

/// Redirect targets used by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPaths {
    pub login: String,
    pub no_auth: String,
}

impl Default for GuardPaths {
    fn default() -> Self {
        Self {
            login: "/user/login".to_string(),
            no_auth: "/noAuth".to_string(),
        }
    }
}

impl GuardPaths {
    /// Login redirect that carries the intended destination for post-login return.
    pub fn login_redirect(&self, full_path: &str) -> String {
        format!("{}?redirect={}", self.login, full_path)
    }
}
