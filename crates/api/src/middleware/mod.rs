//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- extracts the authenticated account from a JWT
//!   Bearer token.
//! - [`rbac::RequireAdmin`] -- requires the `ADMIN` role.

pub mod auth;
pub mod rbac;
