//! Well-known role name constants.
//!
//! These must match the CHECK constraint in `20260301000001_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_DOCENT: &str = "DOCENT";
pub const ROLE_STUDENT: &str = "STUDENT";

/// Whether `role` is one of the three known role names.
pub fn is_valid_role(role: &str) -> bool {
    matches!(role, ROLE_ADMIN | ROLE_DOCENT | ROLE_STUDENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles_are_valid() {
        assert!(is_valid_role(ROLE_ADMIN));
        assert!(is_valid_role(ROLE_DOCENT));
        assert!(is_valid_role(ROLE_STUDENT));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(!is_valid_role("admin"));
        assert!(!is_valid_role("TEACHER"));
        assert!(!is_valid_role(""));
    }
}
