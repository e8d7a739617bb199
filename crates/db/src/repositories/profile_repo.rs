//! Repository for the `profiles` document store.

use sqlx::types::Json;
use sqlx::PgPool;
use tandem_core::types::UserId;

use crate::models::profile::{CreateProfile, ProfilePatch, ProfileRecord};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, preferences, created_at, updated_at";

/// Provides CRUD operations for profile documents.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile under the owning credential's id. Preferences
    /// start from the store default.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<ProfileRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (id, name, email)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProfileRecord>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by id.
    pub async fn find_by_id(pool: &PgPool, id: UserId) -> Result<Option<ProfileRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, ProfileRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all profiles ordered by creation time.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProfileRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles ORDER BY created_at");
        sqlx::query_as::<_, ProfileRecord>(&query)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial patch. Only non-`None` fields are written; provided
    /// preference keys are merged over the stored object, the rest are left
    /// untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: UserId,
        patch: &ProfilePatch,
    ) -> Result<Option<ProfileRecord>, sqlx::Error> {
        let prefs = patch.preferences.clone().unwrap_or_default();
        let query = format!(
            "UPDATE profiles SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                preferences = preferences || $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProfileRecord>(&query)
            .bind(id)
            .bind(&patch.name)
            .bind(&patch.email)
            .bind(Json(&prefs))
            .fetch_optional(pool)
            .await
    }

    /// Delete a profile. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
