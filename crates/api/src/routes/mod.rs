pub mod auth;
pub mod health;
pub mod users;

use axum::Router;

use crate::error::ApiError;
use crate::state::AppState;
use tandem_core::error::CoreError;

/// Build the full route tree.
///
/// ```text
/// GET  /health          service + store health (public)
///
/// POST /auth/register   register (public)
/// POST /auth/login      login (public)
///
/// GET  /me              current profile (requires auth)
/// PUT  /me              update profile (requires auth)
/// DELETE /me            delete account (requires auth)
///
/// GET  /admin/users     list all profiles (admin only)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/auth", auth::router())
        .merge(users::router())
        .fallback(route_not_found)
}

/// Fallback for unmatched paths: 404 with the stable `ROUTE_NOT_FOUND` code
/// instead of axum's empty default.
async fn route_not_found() -> ApiError {
    CoreError::route_not_found().into()
}
