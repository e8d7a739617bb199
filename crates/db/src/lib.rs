//! Store access for the tandem account service.
//!
//! Two Postgres-backed stores share this crate: the relational credential
//! store (identity, password hash, role, audit trail) and the document-style
//! profile store (display data keyed by the credential id). Each store is
//! reached through its own pool; nothing in here opens a transaction across
//! the two.

pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Cheap liveness probe used by the health endpoint.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}

/// Apply embedded migrations to the given store.
///
/// The full schema is applied to every configured store; when the credential
/// and profile stores live in different databases each one only ever touches
/// its own tables.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
