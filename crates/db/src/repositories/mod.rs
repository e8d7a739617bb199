//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept the owning store's `&PgPool` as the first argument. Credential and
//! audit methods expect the credential-store pool; profile methods expect the
//! profile-store pool.

pub mod audit_repo;
pub mod credential_repo;
pub mod profile_repo;

pub use audit_repo::AuditRepo;
pub use credential_repo::CredentialRepo;
pub use profile_repo::ProfileRepo;
