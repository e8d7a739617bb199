//! Handlers for the `/auth` resource (registration, login).
//!
//! Registration is the one place in the system that writes to both stores in
//! a single logical operation. There is no cross-store transaction, so the
//! handler carries the compensation path itself: a failed profile write
//! deletes the just-created credential before the error propagates.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tandem_core::error::{CoreError, FieldIssue};
use tandem_core::roles::{is_known_role, ROLE_ADMIN, ROLE_USER};
use tandem_db::models::credential::CreateCredential;
use tandem_db::models::profile::CreateProfile;
use tandem_db::repositories::{CredentialRepo, ProfileRepo};
use validator::{Validate, ValidationError};

use crate::audit;
use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{ApiError, ApiResult};
use crate::extract::{RequestMeta, ValidatedJson};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[serde(default = "default_role")]
    #[validate(custom(function = validate_role))]
    pub role: String,
    #[serde(default, rename = "adminSecret")]
    pub admin_secret: Option<String>,
}

fn default_role() -> String {
    ROLE_USER.to_string()
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    if is_known_role(role) {
        return Ok(());
    }
    Err(ValidationError::new("role").with_message("role must be either USER or ADMIN".into()))
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /auth/register
///
/// Create a credential and a matching profile, atomically from the caller's
/// perspective, and return a token bound to the new account.
pub async fn register(
    State(state): State<AppState>,
    meta: RequestMeta,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    // Cross-field rule the derive can't express: an ADMIN registration must
    // carry a non-blank secret. Checked before gating so a missing secret is
    // a validation failure, not a policy one.
    if input.role == ROLE_ADMIN
        && input
            .admin_secret
            .as_deref()
            .map_or(true, |s| s.trim().is_empty())
    {
        let message = "Admin secret is required when registering an administrator account";
        return Err(CoreError::validation(
            format!("adminSecret: {message}"),
            vec![FieldIssue {
                path: "adminSecret".to_string(),
                message: message.to_string(),
            }],
        )
        .into());
    }

    // Admin registration is gated on a configured invite secret; the two
    // failure modes are distinct.
    if input.role == ROLE_ADMIN {
        let Some(expected) = state.config.admin_invite_secret.as_deref() else {
            return Err(CoreError::admin_registration_disabled().into());
        };
        if input.admin_secret.as_deref() != Some(expected) {
            return Err(CoreError::admin_secret_invalid().into());
        }
    }

    // Friendly duplicate check. Two registrations racing past this point are
    // decided by the unique constraint on email; the loser surfaces as the
    // same 409 through the sqlx classifier.
    if CredentialRepo::find_by_email(&state.auth_pool, &input.email)
        .await?
        .is_some()
    {
        return Err(CoreError::email_exists().into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| ApiError::Internal(format!("Password hashing error: {e}")))?;

    let credential = CredentialRepo::create(
        &state.auth_pool,
        &CreateCredential {
            email: input.email.clone(),
            password_hash,
            role: input.role.clone(),
        },
    )
    .await?;

    // Compensation: a credential without a profile must not survive this
    // handler. The cleanup itself is best-effort; the original failure is
    // what the caller sees.
    let profile_input = CreateProfile {
        id: credential.id,
        name: input.name.clone(),
        email: input.email.clone(),
    };
    if let Err(err) = ProfileRepo::create(&state.profile_pool, &profile_input).await {
        audit::record(
            &state.auth_pool,
            audit::entry(
                Some(credential.id),
                audit::ACTION_ROLLBACK_PROFILE_FAIL,
                &RequestMeta::default(),
            ),
        );
        if let Err(cleanup) = CredentialRepo::delete(&state.auth_pool, credential.id).await {
            tracing::error!(
                user_id = %credential.id,
                error = %cleanup,
                "credential rollback failed after profile write error"
            );
        }
        return Err(err.into());
    }

    let token = generate_token(credential.id, &credential.role, &state.config.jwt)
        .map_err(|e| ApiError::Internal(format!("Token generation error: {e}")))?;

    let action = if credential.role == ROLE_ADMIN {
        audit::ACTION_REGISTER_ADMIN
    } else {
        audit::ACTION_REGISTER
    };
    audit::record(
        &state.auth_pool,
        audit::entry(Some(credential.id), action, &meta),
    );

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            token,
            role: credential.role,
        }),
    ))
}

/// POST /auth/login
///
/// Authenticate with email + password. An unknown email and a wrong password
/// are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    meta: RequestMeta,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let Some(credential) = CredentialRepo::find_by_email(&state.auth_pool, &input.email).await?
    else {
        return Err(CoreError::invalid_credentials().into());
    };

    let password_valid = verify_password(&input.password, &credential.password_hash)
        .map_err(|e| ApiError::Internal(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(CoreError::invalid_credentials().into());
    }

    let token = generate_token(credential.id, &credential.role, &state.config.jwt)
        .map_err(|e| ApiError::Internal(format!("Token generation error: {e}")))?;

    audit::record(
        &state.auth_pool,
        audit::entry(Some(credential.id), audit::ACTION_LOGIN, &meta),
    );

    Ok(Json(TokenResponse {
        token,
        role: credential.role,
    }))
}
