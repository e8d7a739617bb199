//! Well-known role name constants.
//!
//! These must match the CHECK constraint in the credentials migration.

pub const ROLE_USER: &str = "USER";
pub const ROLE_ADMIN: &str = "ADMIN";

/// Whether `role` names a role the credential store accepts.
pub fn is_known_role(role: &str) -> bool {
    role == ROLE_USER || role == ROLE_ADMIN
}
