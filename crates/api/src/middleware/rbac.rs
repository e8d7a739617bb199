//! Role-based access control extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tandem_core::error::CoreError;
use tandem_core::roles::ROLE_ADMIN;

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Requires the `ADMIN` role. Rejects with 403 `ADMIN_REQUIRED` otherwise.
///
/// The role comes from the token claims, not a live credential lookup --
/// authorization is as stateless as authentication.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> ApiResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(ApiError::Core(CoreError::admin_required()));
        }
        Ok(RequireAdmin(user))
    }
}
