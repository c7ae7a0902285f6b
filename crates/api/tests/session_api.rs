//! HTTP-level tests for admin session issuance and logout.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    admin_cookie, admin_cookie_issued_at, body_json, get_with_cookie, post_json, seed_admin,
    set_cookies, unconnected_pool,
};
use serde_json::json;
use sqlx::PgPool;
use vitals_core::admin_session::verify_admin_token;
use vitals_db::repositories::AdminRepo;

#[tokio::test]
async fn set_admin_cookie_requires_admin_id() {
    let app = common::build_test_app(unconnected_pool());
    let response = post_json(app, "/api/set-admin-cookie", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "adminId is required");
}

#[tokio::test]
async fn set_admin_cookie_rejects_non_uuid() {
    let app = common::build_test_app(unconnected_pool());
    let response = post_json(app, "/api/set-admin-cookie", json!({ "adminId": "42" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_admin_cookie_issues_signed_session(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/set-admin-cookie", json!({ "adminId": admin.id })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);

    let id = admin.id.to_string();
    let id_cookie = cookies.iter().find(|c| c.starts_with("admin_id=")).unwrap();
    assert!(id_cookie.starts_with(&format!("admin_id={id};")));
    assert!(!id_cookie.contains("HttpOnly"));
    assert!(id_cookie.contains("Max-Age=3600"));

    let token_cookie = cookies.iter().find(|c| c.starts_with("admin_token=")).unwrap();
    assert!(token_cookie.contains("HttpOnly"));
    let token = token_cookie
        .strip_prefix("admin_token=")
        .and_then(|rest| rest.split(';').next())
        .unwrap();
    let now = chrono::Utc::now().timestamp();
    assert!(verify_admin_token(common::TEST_SECRET, &id, token, now, 3600));

    assert_eq!(body_json(response).await["success"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn issued_session_is_accepted(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let app = common::build_test_app(pool);
    let response = get_with_cookie(app, "/api/admin/all-organizations", &admin_cookie(admin.id))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_admin_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/set-admin-cookie",
        json!({ "adminId": uuid::Uuid::new_v4() }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Unauthorized");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_admin_is_unauthorized(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    AdminRepo::deactivate(&pool, admin.id).await.unwrap();
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/set-admin-cookie", json!({ "adminId": admin.id })).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&response).is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_ends_when_admin_is_deactivated(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let cookie = admin_cookie(admin.id);

    let app = common::build_test_app(pool.clone());
    let response = get_with_cookie(app, "/api/admin/all-organizations", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    AdminRepo::deactivate(&pool, admin.id).await.unwrap();

    let app = common::build_test_app(pool);
    let response = get_with_cookie(app, "/api/admin/all-organizations", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Unauthorized");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn signed_session_for_unknown_admin_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = admin_cookie(uuid::Uuid::new_v4());

    let response = get_with_cookie(app, "/api/admin/all-organizations", &cookie).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expired_session_is_rejected(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let app = common::build_test_app(pool);
    // The test config allows one hour.
    let issued_at = chrono::Utc::now().timestamp() - 3601;
    let cookie = admin_cookie_issued_at(admin.id, issued_at);

    let response = get_with_cookie(app, "/api/admin/all-surveys", &cookie).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_expires_admin_and_provider_cookies() {
    let app = common::build_test_app(unconnected_pool());
    let request = Request::post("/api/logout")
        .header("cookie", "admin_id=x; sb-access-token=a; sb-refresh-token=b; theme=dark")
        .body(Body::empty())
        .unwrap();

    let response = common::send(app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    let names: Vec<&str> = cookies
        .iter()
        .map(|c| c.split('=').next().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["admin_id", "admin_token", "sb-access-token", "sb-refresh-token"]
    );
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
    assert_eq!(body_json(response).await["success"], true);
}

#[tokio::test]
async fn logout_without_cookies_still_succeeds() {
    let app = common::build_test_app(unconnected_pool());
    let response = common::send(
        app,
        Request::post("/api/logout").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(set_cookies(&response).len(), 2);
}
