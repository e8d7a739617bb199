//! Handlers for the `/admin` resource.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use tandem_core::types::UserId;
use tandem_db::models::credential::Identity;
use tandem_db::repositories::{CredentialRepo, ProfileRepo};

use crate::error::ApiResult;
use crate::handlers::profile::{apply_identity, ProfileView};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /admin/users
///
/// List every profile, enriched with live credential role/email. The two
/// stores are read independently and joined in memory on the shared id;
/// profiles without a credential appear with the lenient `USER` default.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> ApiResult<Json<Vec<ProfileView>>> {
    let profiles = ProfileRepo::list(&state.profile_pool).await?;
    let identities = CredentialRepo::list_identities(&state.auth_pool).await?;

    let by_id: HashMap<UserId, Identity> = identities
        .into_iter()
        .map(|identity| (identity.id, identity))
        .collect();

    let views = profiles
        .into_iter()
        .map(|profile| {
            let identity = by_id.get(&profile.id);
            apply_identity(profile, identity)
        })
        .collect();

    Ok(Json(views))
}
