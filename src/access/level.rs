/*
 * Responsibility
 * - ルートに付与するアクセスレベル (NotLogin < User < Admin)
 * - role 文字列 ("notLogin" / "user" / "admin") との相互変換
 */
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Privilege tier required by a route, or held by a user role.
///
/// Variants are declared from least to most privileged; the derived `Ord`
/// is the "at least as privileged" relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum AccessLevel {
    #[default]
    NotLogin,
    User,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown access level: {0}")]
pub struct UnknownAccessLevel(pub String);

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::NotLogin => "notLogin",
            AccessLevel::User => "user",
            AccessLevel::Admin => "admin",
        }
    }

    pub fn requires_login(&self) -> bool {
        *self != AccessLevel::NotLogin
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = UnknownAccessLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notLogin" => Ok(AccessLevel::NotLogin),
            "user" => Ok(AccessLevel::User),
            "admin" => Ok(AccessLevel::Admin),
            other => Err(UnknownAccessLevel(other.to_string())),
        }
    }
}
