//! Store model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the stored row
//! - A create DTO for inserts
//! - Where a resource is patchable, an all-`Option` patch DTO

pub mod audit;
pub mod credential;
pub mod profile;
