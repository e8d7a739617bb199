//! Shared domain types for the tandem account service.
//!
//! - [`error`] -- the domain error taxonomy and stable machine-readable
//!   reason codes surfaced in API error bodies.
//! - [`roles`] -- well-known role name constants.
//! - [`types`] -- id and timestamp aliases used across stores.

pub mod error;
pub mod roles;
pub mod types;
