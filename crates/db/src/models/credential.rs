//! Credential entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use tandem_core::types::{Timestamp, UserId};

/// Full credential row from the `credentials` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// External responses expose [`Identity`] or an enriched profile instead.
#[derive(Debug, Clone, FromRow)]
pub struct Credential {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a credential. The id is generated by the store.
#[derive(Debug)]
pub struct CreateCredential {
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// Identity projection used for profile enrichment and admin listings.
/// Carries no secret material.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub role: String,
}
