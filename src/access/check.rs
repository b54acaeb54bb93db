use crate::access::{AccessLevel, LoginUser};

/// Returns true when `user`'s role is at least as privileged as `required`.
///
/// A role string that is not a known [`AccessLevel`] never satisfies a
/// privileged requirement.
pub fn check_access(user: &LoginUser, required: AccessLevel) -> bool {
    if !required.requires_login() {
        return true;
    }

    match user.role().map(str::parse::<AccessLevel>) {
        Some(Ok(role)) => role >= required,
        Some(Err(err)) => {
            tracing::debug!(error = %err, required = %required, "unrecognised user role");
            false
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anyone_passes_not_login() {
        assert!(check_access(&LoginUser::default(), AccessLevel::NotLogin));
        assert!(check_access(&LoginUser::with_role("ban"), AccessLevel::NotLogin));
    }

    #[test]
    fn user_level_requires_a_logged_in_role() {
        assert!(check_access(&LoginUser::with_role("user"), AccessLevel::User));
        assert!(check_access(&LoginUser::with_role("admin"), AccessLevel::User));
        assert!(!check_access(&LoginUser::with_role("notLogin"), AccessLevel::User));
        assert!(!check_access(&LoginUser::default(), AccessLevel::User));
    }

    #[test]
    fn admin_level_requires_admin() {
        assert!(check_access(&LoginUser::with_role("admin"), AccessLevel::Admin));
        assert!(!check_access(&LoginUser::with_role("user"), AccessLevel::Admin));
    }

    #[test]
    fn unknown_roles_fail_privileged_checks() {
        assert!(!check_access(&LoginUser::with_role("ban"), AccessLevel::User));
        assert!(!check_access(&LoginUser::with_role("superuser"), AccessLevel::Admin));
    }
}
