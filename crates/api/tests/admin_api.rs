//! HTTP-level integration tests for the admin listing and its authorization
//! boundary.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth};
use sqlx::PgPool;

/// The listing requires authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_users_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/admin/users").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["reason"], "TOKEN_MISSING");
}

/// A USER-role token is rejected with 403 `ADMIN_REQUIRED`.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_users_requires_admin_role(pool: PgPool) {
    let registered = common::register_user(&pool, "Dana", "dana@example.com", "password123").await;
    let token = registered["token"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/admin/users", token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["reason"], "ADMIN_REQUIRED");
}

/// An ADMIN token lists every account with its enriched role.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_users_lists_enriched_profiles(pool: PgPool) {
    let admin = common::register_admin(&pool, "Root", "root@example.com", "password123").await;
    common::register_user(&pool, "Dana", "dana@example.com", "password123").await;
    common::register_user(&pool, "Eli", "eli@example.com", "password123").await;

    let token = admin["token"].as_str().unwrap();
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/admin/users", token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let users = json.as_array().expect("response body should be an array");
    assert_eq!(users.len(), 3);

    let root = users
        .iter()
        .find(|u| u["email"] == "root@example.com")
        .expect("admin account should be listed");
    assert_eq!(root["role"], "ADMIN");

    let dana = users
        .iter()
        .find(|u| u["email"] == "dana@example.com")
        .expect("user account should be listed");
    assert_eq!(dana["role"], "USER");
    assert_eq!(dana["preferences"]["theme"], "light");
}
