use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status: `ok` when both stores answer.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the credential store is reachable.
    pub auth_db_healthy: bool,
    /// Whether the profile store is reachable.
    pub profile_db_healthy: bool,
}

/// GET /health -- returns service and per-store health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let auth_db_healthy = tandem_db::health_check(&state.auth_pool).await.is_ok();
    let profile_db_healthy = tandem_db::health_check(&state.profile_pool).await.is_ok();

    let status = if auth_db_healthy && profile_db_healthy {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        auth_db_healthy,
        profile_db_healthy,
    })
}

/// Mount health check routes at the root.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
