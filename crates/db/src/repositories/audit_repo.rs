//! Repository for the append-only `audit_log` table.

use sqlx::PgPool;

use crate::models::audit::CreateAuditEntry;

/// Provides insert-only access to the audit trail.
pub struct AuditRepo;

impl AuditRepo {
    /// Append a single audit entry.
    pub async fn insert(pool: &PgPool, entry: &CreateAuditEntry) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO audit_log (user_id, action, ip, user_agent)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(entry.user_id)
        .bind(&entry.action)
        .bind(&entry.ip)
        .bind(&entry.user_agent)
        .execute(pool)
        .await?;
        Ok(())
    }
}
