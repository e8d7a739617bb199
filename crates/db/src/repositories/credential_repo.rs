//! Repository for the `credentials` table.

use sqlx::PgPool;
use tandem_core::types::UserId;

use crate::models::credential::{CreateCredential, Credential, Identity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, role, created_at, updated_at";

/// Identity projection columns (no secret material).
const IDENTITY_COLUMNS: &str = "id, email, role";

/// Provides CRUD operations for credentials.
pub struct CredentialRepo;

impl CredentialRepo {
    /// Insert a new credential, returning the created row with its
    /// store-generated id.
    pub async fn create(pool: &PgPool, input: &CreateCredential) -> Result<Credential, sqlx::Error> {
        let query = format!(
            "INSERT INTO credentials (email, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Credential>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a credential by id.
    pub async fn find_by_id(pool: &PgPool, id: UserId) -> Result<Option<Credential>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM credentials WHERE id = $1");
        sqlx::query_as::<_, Credential>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a credential by email (case-sensitive).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Credential>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM credentials WHERE email = $1");
        sqlx::query_as::<_, Credential>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find the identity projection for one account. Used by profile
    /// enrichment on every read.
    pub async fn find_identity(pool: &PgPool, id: UserId) -> Result<Option<Identity>, sqlx::Error> {
        let query = format!("SELECT {IDENTITY_COLUMNS} FROM credentials WHERE id = $1");
        sqlx::query_as::<_, Identity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List identity projections for every account.
    pub async fn list_identities(pool: &PgPool) -> Result<Vec<Identity>, sqlx::Error> {
        let query = format!("SELECT {IDENTITY_COLUMNS} FROM credentials ORDER BY created_at");
        sqlx::query_as::<_, Identity>(&query).fetch_all(pool).await
    }

    /// Update a credential's email. Returns `true` if a row was updated.
    pub async fn update_email(pool: &PgPool, id: UserId, email: &str) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE credentials SET email = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(email)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a credential. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM credentials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
