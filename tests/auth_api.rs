//! Account API tests
//!
//! Registration, login, token checks, listings and deletion, driven through
//! the full router on an in-memory store.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use chrono::{Duration, Utc};
use serde_json::json;

use common::{token_for, token_issued_at, TestApp};
use jobboard::backend::routes::router::LIVENESS_MESSAGE;
use jobboard::backend::store::UserStore;
use jobboard::shared::{Role, RoleSource};

#[tokio::test]
async fn test_register_normalizes_role_and_email() {
    let app = TestApp::new();

    let body = assert_status!(
        app.register("alice", "Alice@Example.COM", "pw-1", "EMPLOYER").await,
        StatusCode::CREATED
    );
    assert_eq!(body, json!({ "message": "User registered successfully" }));

    let user = app
        .store
        .find_by_name("alice")
        .await
        .unwrap()
        .expect("stored");
    assert_eq!(user.role, Role::Employer);
    assert_eq!(user.email, "alice@example.com");
    assert_ne!(user.password_hash, "pw-1");
    assert!(!user.is_deleted);
}

#[tokio::test]
async fn test_register_duplicates_conflict() {
    let app = TestApp::new();
    assert_status!(
        app.register("alice", "alice@example.com", "pw", "employer").await,
        StatusCode::CREATED
    );

    assert_error!(
        app.register("other", "ALICE@example.com", "pw", "jobseeker").await,
        StatusCode::CONFLICT,
        "A user with this email already exists"
    );
    assert_error!(
        app.register("alice", "fresh@example.com", "pw", "jobseeker").await,
        StatusCode::CONFLICT,
        "A user with this name already exists"
    );
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let app = TestApp::new();

    let body = assert_status!(
        app.register("bob", "bob@example.com", "pw", "recruiter").await,
        StatusCode::BAD_REQUEST
    );
    assert_contains!(body["error"].as_str().unwrap(), "admin, employer, jobseeker");

    assert_error!(
        app.request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "name": "bob", "email": "bob@example.com", "role": "employer" })),
        )
        .await,
        StatusCode::BAD_REQUEST,
        "password is required"
    );

    let malformed = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    assert_status!(app.send(malformed).await, StatusCode::BAD_REQUEST);

    assert!(app.store.find_by_name("bob").await.unwrap().is_none());
}

#[tokio::test]
async fn test_login_returns_only_token() {
    let app = TestApp::new();
    app.register("carol", "carol@example.com", "secret", "jobseeker").await;

    let body = assert_status!(app.login("carol@example.com", "secret").await, StatusCode::OK);
    let object = body.as_object().expect("object body");
    assert_eq!(object.len(), 1);
    assert!(object["token"].as_str().is_some_and(|t| !t.is_empty()));

    // Name and mixed-case email both identify the account
    assert_status!(app.login("carol", "secret").await, StatusCode::OK);
    assert_status!(app.login("CAROL@example.com", "secret").await, StatusCode::OK);

    // The `email` alias is accepted too
    assert_status!(
        app.request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "carol@example.com", "password": "secret" })),
        )
        .await,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register("dave", "dave@example.com", "right", "employer").await;

    let wrong_password = assert_status!(app.login("dave", "wrong").await, StatusCode::UNAUTHORIZED);
    let unknown_user = assert_status!(app.login("nobody", "right").await, StatusCode::UNAUTHORIZED);

    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_requires_fields() {
    let app = TestApp::new();
    assert_status!(
        app.request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "identifier": "dave" })),
        )
        .await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_me_requires_bearer_token() {
    let app = TestApp::new();

    assert_error!(
        app.request(Method::GET, "/api/auth/me", None, None).await,
        StatusCode::UNAUTHORIZED,
        "Unauthorized: No token provided"
    );

    let basic = Request::builder()
        .uri("/api/auth/me")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwdw==")
        .body(Body::empty())
        .unwrap();
    assert_error!(
        app.send(basic).await,
        StatusCode::UNAUTHORIZED,
        "Unauthorized: No token provided"
    );
}

#[tokio::test]
async fn test_invalid_and_expired_tokens_rejected() {
    let app = TestApp::new();
    let erin = app.create_user("erin", "employer").await;

    assert_error!(
        app.get("/api/auth/me", "not-a-jwt").await,
        StatusCode::UNAUTHORIZED,
        "Invalid or expired token"
    );

    let expired = token_issued_at(erin.id, Role::Employer, Utc::now() - Duration::hours(25));
    assert_error!(
        app.get("/api/auth/me", &expired).await,
        StatusCode::UNAUTHORIZED,
        "Invalid or expired token"
    );

    let body = assert_status!(app.get("/api/auth/me", &erin.token).await, StatusCode::OK);
    assert_eq!(body["id"], erin.id);
    assert_eq!(body["name"], "erin");
    assert_eq!(body["role"], "employer");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_listings_filter_by_deletion_state() {
    let app = TestApp::new();
    let frank = app.create_user("frank", "employer").await;
    let grace = app.create_user("grace", "jobseeker").await;

    assert_status!(
        app.delete(&format!("/api/auth/user/soft/{}", grace.id), &grace.token).await,
        StatusCode::OK
    );

    let all = assert_status!(app.get("/api/auth/users", &frank.token).await, StatusCode::OK);
    let all = all.as_array().expect("array");
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|u| u.get("password_hash").is_none()));

    let active = assert_status!(app.get("/api/auth/users/active", &frank.token).await, StatusCode::OK);
    assert_eq!(active.as_array().unwrap().len(), 1);
    assert_eq!(active[0]["name"], "frank");

    let inactive = assert_status!(app.get("/api/auth/users/inactive", &frank.token).await, StatusCode::OK);
    assert_eq!(inactive.as_array().unwrap().len(), 1);
    assert_eq!(inactive[0]["name"], "grace");
    assert_eq!(inactive[0]["is_deleted"], true);
}

#[tokio::test]
async fn test_get_user_by_id_variants() {
    let app = TestApp::new();
    let heidi = app.create_user("heidi", "employer").await;
    let ivan = app.create_user("ivan", "jobseeker").await;

    let body = assert_status!(
        app.get(&format!("/api/auth/user/{}", ivan.id), &heidi.token).await,
        StatusCode::OK
    );
    assert_eq!(body["name"], "ivan");

    assert_error!(
        app.get(&format!("/api/auth/user/inactive/{}", ivan.id), &heidi.token).await,
        StatusCode::NOT_FOUND,
        "Inactive user not found"
    );
    assert_error!(
        app.get("/api/auth/user/9999", &heidi.token).await,
        StatusCode::NOT_FOUND,
        "User not found"
    );
    assert_status!(
        app.get("/api/auth/user/abc", &heidi.token).await,
        StatusCode::BAD_REQUEST
    );

    app.delete(&format!("/api/auth/user/soft/{}", ivan.id), &ivan.token).await;
    assert_error!(
        app.get(&format!("/api/auth/user/active/{}", ivan.id), &heidi.token).await,
        StatusCode::NOT_FOUND,
        "Active user not found"
    );
    assert_status!(
        app.get(&format!("/api/auth/user/inactive/{}", ivan.id), &heidi.token).await,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_soft_delete_own_account_blocks_login() {
    let app = TestApp::new();
    let judy = app.create_user("judy", "jobseeker").await;

    let body = assert_status!(
        app.delete(&format!("/api/auth/user/soft/{}", judy.id), &judy.token).await,
        StatusCode::OK
    );
    assert_eq!(body["message"], "User soft deleted (marked as deleted)");

    assert_error!(
        app.login("judy", &judy.password).await,
        StatusCode::UNAUTHORIZED,
        "Invalid credentials"
    );

    // Already deleted
    assert_error!(
        app.delete(&format!("/api/auth/user/soft/{}", judy.id), &judy.token).await,
        StatusCode::NOT_FOUND,
        "User not found"
    );
}

#[tokio::test]
async fn test_soft_delete_other_account() {
    let app = TestApp::new();
    let mallory = app.create_user("mallory", "employer").await;
    let niaj = app.create_user("niaj", "jobseeker").await;
    let admin = app.create_user("root", "admin").await;

    assert_error!(
        app.delete(&format!("/api/auth/user/soft/{}", niaj.id), &mallory.token).await,
        StatusCode::FORBIDDEN,
        "Access denied. You can only delete your own account."
    );
    assert!(!app.store.find_by_id(niaj.id).await.unwrap().unwrap().is_deleted);

    assert_status!(
        app.delete(&format!("/api/auth/user/soft/{}", niaj.id), &admin.token).await,
        StatusCode::OK
    );
    assert!(app.store.find_by_id(niaj.id).await.unwrap().unwrap().is_deleted);
}

#[tokio::test]
async fn test_hard_delete_is_admin_only() {
    let app = TestApp::new();
    let olivia = app.create_user("olivia", "employer").await;
    let peggy = app.create_user("peggy", "jobseeker").await;
    let admin = app.create_user("boss", "admin").await;

    assert_error!(
        app.delete(&format!("/api/auth/user/hard/{}", peggy.id), &olivia.token).await,
        StatusCode::FORBIDDEN,
        "Access denied. Admins only."
    );
    assert!(app.store.find_by_id(peggy.id).await.unwrap().is_some());

    let body = assert_status!(
        app.delete(&format!("/api/auth/user/hard/{}", peggy.id), &admin.token).await,
        StatusCode::OK
    );
    assert_eq!(body["message"], "User permanently deleted");
    assert!(app.store.find_by_id(peggy.id).await.unwrap().is_none());

    assert_error!(
        app.delete(&format!("/api/auth/user/hard/{}", peggy.id), &admin.token).await,
        StatusCode::NOT_FOUND,
        "User not found"
    );

    // The name is free again once the record is gone
    assert_status!(
        app.register("peggy", "peggy2@example.com", "pw", "jobseeker").await,
        StatusCode::CREATED
    );
}

#[tokio::test]
async fn test_admin_token_for_forged_role_is_rejected_in_store_mode() {
    let app = TestApp::with_role_source(RoleSource::Store);
    let trent = app.create_user("trent", "employer").await;
    let victim = app.create_user("victor", "jobseeker").await;

    // A validly signed token claiming admin for a non-admin account
    let elevated = token_for(trent.id, Role::Admin);
    assert_error!(
        app.delete(&format!("/api/auth/user/hard/{}", victim.id), &elevated).await,
        StatusCode::FORBIDDEN,
        "Access denied. Admins only."
    );

    // Deleted accounts lose access immediately
    app.delete(&format!("/api/auth/user/soft/{}", trent.id), &trent.token).await;
    assert_error!(
        app.get("/api/auth/me", &trent.token).await,
        StatusCode::UNAUTHORIZED,
        "Invalid or expired token"
    );
}

#[tokio::test]
async fn test_token_mode_trusts_claimed_role() {
    let app = TestApp::new();
    let walter = app.create_user("walter", "employer").await;
    let target = app.create_user("wendy", "jobseeker").await;

    let admin_claim = token_for(walter.id, Role::Admin);
    assert_status!(
        app.delete(&format!("/api/auth/user/hard/{}", target.id), &admin_claim).await,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();

    assert_error!(
        app.request(Method::GET, "/api/nothing/here", None, None).await,
        StatusCode::NOT_FOUND,
        "Route not found"
    );
}

#[tokio::test]
async fn test_root_answers_without_token() {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, LIVENESS_MESSAGE);
}

#[tokio::test]
async fn test_register_trims_role_like_other_fields() {
    let app = TestApp::new();

    assert_status!(
        app.register(" zoe ", "zoe@example.com", "pw", " Admin ").await,
        StatusCode::CREATED
    );

    let user = app.store.find_by_name("zoe").await.unwrap().expect("stored");
    assert_eq!(user.role, Role::Admin);
}
