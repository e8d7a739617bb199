//! Route definitions for the profile and admin resources.

use axum::routing::get;
use axum::Router;

use crate::handlers::{admin, profile};
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// GET/PUT/DELETE /me   -> current account's profile (requires auth)
/// GET /admin/users     -> list all profiles (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(profile::get_me)
                .put(profile::update_me)
                .delete(profile::delete_me),
        )
        .route("/admin/users", get(admin::list_users))
}
