use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Credential store pool (relational source of truth for identity,
    /// role, and the audit trail).
    pub auth_pool: tandem_db::DbPool,
    /// Profile store pool (document-style display data). May point at the
    /// same database as `auth_pool`, but nothing may rely on that.
    pub profile_pool: tandem_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
