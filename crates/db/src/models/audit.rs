//! Audit entry model and DTO.
//!
//! The audit trail is append-only; entries have no update path and no
//! `updated_at` column.

use serde::Serialize;
use sqlx::FromRow;
use tandem_core::types::{Timestamp, UserId};

/// A single audit entry. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditEntry {
    pub id: i64,
    pub user_id: Option<UserId>,
    pub action: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending an audit entry.
#[derive(Debug, Clone)]
pub struct CreateAuditEntry {
    pub user_id: Option<UserId>,
    pub action: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}
