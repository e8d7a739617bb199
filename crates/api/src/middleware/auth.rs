//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tandem_core::error::CoreError;
use tandem_core::types::UserId;

use crate::auth::jwt::validate_token;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated account extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// A missing header (or one without the `Bearer ` scheme) rejects with
/// `TOKEN_MISSING`; a token that fails validation rejects with
/// `TOKEN_INVALID`. Use as an extractor parameter in any handler that
/// requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> ApiResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The account id (from `claims.sub`), shared by both stores.
    pub user_id: UserId,
    /// The account's role name (`"USER"` or `"ADMIN"`).
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Core(CoreError::token_missing()))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| ApiError::Core(CoreError::token_invalid()))?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
