//! HTTP-level integration tests for registration and login.
//!
//! Covers the register/login round trip, the duplicate-email conflict, admin
//! registration gating, and credential failure responses.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};
use sqlx::PgPool;
use tandem_api::auth::jwt::validate_token;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Successful registration returns 201 with a token bound to the USER role.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_returns_token_and_role(pool: PgPool) {
    let json = common::register_user(&pool, "Dana", "dana@example.com", "password123").await;

    assert_eq!(json["role"], "USER");
    let token = json["token"].as_str().expect("response must contain token");

    let claims = validate_token(token, &common::test_config().jwt)
        .expect("issued token must validate against the configured secret");
    assert_eq!(claims.role, "USER");
}

/// register(email, password) then login(email, password) succeeds, and the
/// embedded role matches the registered role.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_then_login_round_trip(pool: PgPool) {
    common::register_user(&pool, "Dana", "dana@example.com", "password123").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "dana@example.com", "password": "password123" });
    let response = post_json(app, "/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["role"], "USER");

    let token = json["token"].as_str().unwrap();
    let claims = validate_token(token, &common::test_config().jwt).unwrap();
    assert_eq!(claims.role, "USER");
}

/// Registering the same email twice yields 201 then 409 `EMAIL_EXISTS`.
#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_email_conflicts(pool: PgPool) {
    common::register_user(&pool, "Dana", "dana@example.com", "password123").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Imposter",
        "email": "dana@example.com",
        "password": "different-password",
    });
    let response = post_json(app, "/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["reason"], "EMAIL_EXISTS");
    assert_eq!(json["status"], 409);
}

/// Malformed input is rejected with 400 and a field-level issue list.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_validation_failures_carry_details(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "",
        "email": "not-an-email",
        "password": "short",
    });
    let response = post_json(app, "/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["name"], "ValidationError");
    let details = json["details"].as_array().expect("details must be a list");
    assert_eq!(details.len(), 3);
    assert!(details.iter().any(|d| d["path"] == "email"));
    assert!(details.iter().any(|d| d["path"] == "password"));
}

// ---------------------------------------------------------------------------
// Admin registration gating
// ---------------------------------------------------------------------------

/// role=ADMIN without any secret in the body is a validation failure, not a
/// policy one.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_without_secret_is_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Root",
        "email": "root@example.com",
        "password": "password123",
        "role": "ADMIN",
    });
    let response = post_json(app, "/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let details = json["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d["path"] == "adminSecret"));
}

/// With no invite secret configured, admin registration is disabled.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_registration_disabled_without_config(pool: PgPool) {
    let mut config = common::test_config();
    config.admin_invite_secret = None;
    let app = common::build_test_app_with_config(pool, config);

    let body = serde_json::json!({
        "name": "Root",
        "email": "root@example.com",
        "password": "password123",
        "role": "ADMIN",
        "adminSecret": "anything",
    });
    let response = post_json(app, "/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["reason"], "ADMIN_REGISTRATION_DISABLED");
}

/// A wrong invite secret is rejected with its own reason code.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_registration_wrong_secret(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Root",
        "email": "root@example.com",
        "password": "password123",
        "role": "ADMIN",
        "adminSecret": "not-the-secret",
    });
    let response = post_json(app, "/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["reason"], "ADMIN_SECRET_INVALID");
}

/// The correct invite secret produces a 201 with role ADMIN.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_registration_with_correct_secret(pool: PgPool) {
    let json = common::register_admin(&pool, "Root", "root@example.com", "password123").await;

    assert_eq!(json["role"], "ADMIN");
    let token = json["token"].as_str().unwrap();
    let claims = validate_token(token, &common::test_config().jwt).unwrap();
    assert_eq!(claims.role, "ADMIN");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// A wrong password returns 401 `INVALID_CREDENTIALS`.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_wrong_password(pool: PgPool) {
    common::register_user(&pool, "Dana", "dana@example.com", "password123").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "dana@example.com", "password": "wrong-password" });
    let response = post_json(app, "/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["reason"], "INVALID_CREDENTIALS");
}

/// An unknown email is indistinguishable from a wrong password.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_unknown_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "ghost@example.com", "password": "password123" });
    let response = post_json(app, "/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["reason"], "INVALID_CREDENTIALS");
}
