/*
 * Responsibility
 * - ログインユーザーのプロフィール (session store が保持する identity)
 * - guard は読むだけで、書き換えは session 層の責務
 */
use serde::{Deserialize, Serialize};

/// Profile record of the logged-in user.
///
/// `user_role` may be missing when the backend returned a partial profile;
/// the guard treats that the same as having no identity at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_avatar: Option<String>,
    #[serde(default)]
    pub user_profile: Option<String>,
    #[serde(default)]
    pub user_role: Option<String>,
}

impl LoginUser {
    #[cfg(test)]
    pub fn with_role(role: impl Into<String>) -> Self {
        Self {
            user_role: Some(role.into()),
            ..Self::default()
        }
    }

    /// Role string, if one is present and non-empty.
    pub fn role(&self) -> Option<&str> {
        self.user_role.as_deref().filter(|r| !r.is_empty())
    }
}
