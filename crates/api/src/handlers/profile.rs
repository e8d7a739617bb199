//! Handlers for the current account's profile (`/me`).
//!
//! Every profile that leaves this module is enriched: role and email come
//! from the credential store at read time, never from the stored document.
//! The role is not stored in the profile at all, and the credential email
//! wins whenever the denormalized copy has lagged behind.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tandem_core::error::CoreError;
use tandem_core::roles::ROLE_USER;
use tandem_core::types::{Timestamp, UserId};
use tandem_db::models::credential::Identity;
use tandem_db::models::profile::{Preferences, PreferencesPatch, ProfilePatch, ProfileRecord};
use tandem_db::repositories::{CredentialRepo, ProfileRepo};
use tandem_db::DbPool;
use validator::{Validate, ValidationError};

use crate::audit;
use crate::error::ApiResult;
use crate::extract::{RequestMeta, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Externally visible profile: the stored document merged with live
/// credential data.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub preferences: Preferences,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `PUT /me`. All fields optional; absent fields are left
/// unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(nested)]
    pub preferences: Option<PreferencesInput>,
}

/// Preferences patch accepted from clients.
#[derive(Debug, Deserialize, Validate)]
pub struct PreferencesInput {
    #[validate(custom(function = validate_theme))]
    pub theme: Option<String>,
    pub language: Option<String>,
}

fn validate_theme(theme: &str) -> Result<(), ValidationError> {
    if theme == "light" || theme == "dark" {
        return Ok(());
    }
    Err(ValidationError::new("theme").with_message("theme must be either light or dark".into()))
}

impl From<PreferencesInput> for PreferencesPatch {
    fn from(input: PreferencesInput) -> Self {
        PreferencesPatch {
            theme: input.theme,
            language: input.language,
        }
    }
}

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

/// Merge a stored profile with its credential identity.
///
/// A profile whose credential is gone (an orphan from a half-finished
/// deletion) degrades leniently: the stored email stands in and the role
/// defaults to `USER`. This is deliberate -- reads must not fail on the
/// inconsistency windows the two-store model admits.
pub(crate) fn apply_identity(record: ProfileRecord, identity: Option<&Identity>) -> ProfileView {
    ProfileView {
        id: record.id,
        name: record.name,
        email: identity
            .map(|i| i.email.clone())
            .unwrap_or(record.email),
        role: identity
            .map(|i| i.role.clone())
            .unwrap_or_else(|| ROLE_USER.to_string()),
        preferences: record.preferences.0,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

/// Enrich one profile with a live credential lookup.
async fn enrich(auth_pool: &DbPool, record: ProfileRecord) -> ApiResult<ProfileView> {
    let identity = CredentialRepo::find_identity(auth_pool, record.id).await?;
    Ok(apply_identity(record, identity.as_ref()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /me
pub async fn get_me(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<ProfileView>> {
    let record = ProfileRepo::find_by_id(&state.profile_pool, user.user_id)
        .await?
        .ok_or_else(CoreError::profile_not_found)?;

    Ok(Json(enrich(&state.auth_pool, record).await?))
}

/// PUT /me
///
/// Partial update. An email change touches the credential store first, then
/// the full patch (including the denormalized email copy) lands on the
/// profile. There is no rollback on this path: if the profile write fails,
/// the stored copy stays stale until the next successful update, and reads
/// keep serving the credential value through enrichment.
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    meta: RequestMeta,
    ValidatedJson(input): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileView>> {
    if let Some(email) = &input.email {
        CredentialRepo::update_email(&state.auth_pool, user.user_id, email).await?;
    }

    let patch = ProfilePatch {
        name: input.name,
        email: input.email,
        preferences: input.preferences.map(Into::into),
    };
    let updated = ProfileRepo::update(&state.profile_pool, user.user_id, &patch)
        .await?
        .ok_or_else(CoreError::profile_not_found)?;

    audit::record(
        &state.auth_pool,
        audit::entry(Some(user.user_id), audit::ACTION_UPDATE_PROFILE, &meta),
    );

    Ok(Json(enrich(&state.auth_pool, updated).await?))
}

/// DELETE /me
///
/// Remove both halves of the account, profile first: a credential is never
/// deleted while a profile still exists. The reverse window is accepted --
/// if the credential delete fails the profile is already gone and the error
/// propagates with no compensation.
pub async fn delete_me(
    State(state): State<AppState>,
    user: AuthUser,
    meta: RequestMeta,
) -> ApiResult<StatusCode> {
    let removed = ProfileRepo::delete(&state.profile_pool, user.user_id).await?;
    if !removed {
        return Err(CoreError::profile_not_found().into());
    }

    CredentialRepo::delete(&state.auth_pool, user.user_id).await?;

    audit::record(
        &state.auth_pool,
        audit::entry(Some(user.user_id), audit::ACTION_DELETE_ACCOUNT, &meta),
    );

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json as SqlJson;
    use uuid::Uuid;

    fn record(id: UserId) -> ProfileRecord {
        ProfileRecord {
            id,
            name: "Dana".to_string(),
            email: "stale@example.com".to_string(),
            preferences: SqlJson(Preferences::default()),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn credential_values_win_over_stored_copies() {
        let id = Uuid::new_v4();
        let identity = Identity {
            id,
            email: "current@example.com".to_string(),
            role: "ADMIN".to_string(),
        };

        let view = apply_identity(record(id), Some(&identity));
        assert_eq!(view.email, "current@example.com");
        assert_eq!(view.role, "ADMIN");
    }

    #[test]
    fn orphaned_profile_defaults_to_user_role() {
        let view = apply_identity(record(Uuid::new_v4()), None);
        assert_eq!(view.email, "stale@example.com");
        assert_eq!(view.role, "USER");
    }
}
