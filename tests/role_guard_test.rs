mod common;

use assignment_backend::model::user::UserRole;
use axum::http::StatusCode;
use common::setup_app;
use serde_json::json;

#[tokio::test]
async fn test_admin_can_list_users() {
    let app = setup_app();
    app.seed_user("boss@x.com", UserRole::Admin).await;
    app.seed_user("student@x.com", UserRole::None).await;

    let token = app.token_for("boss@x.com");
    let (status, body) = app.get("/users", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let emails: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, vec!["boss@x.com", "student@x.com"]);
}

#[tokio::test]
async fn test_non_admin_is_forbidden() {
    let app = setup_app();
    app.seed_user("student@x.com", UserRole::None).await;

    let token = app.token_for("student@x.com");
    let (status, body) = app.get("/users", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "forbidden access");
}

#[tokio::test]
async fn test_unknown_identity_is_forbidden() {
    let app = setup_app();
    let token = app.token_for("ghost@x.com");
    let (status, _) = app.get("/users", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_without_email_is_forbidden() {
    let app = setup_app();
    let (_, body) = app.post("/jwt", json!({ "name": "anonymous" }), None).await;
    let token = body["token"].as_str().unwrap().to_string();
    let (status, _) = app.get("/users", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_auth_guard_runs_before_role_guard() {
    let app = setup_app();
    let (status, _) = app.get("/users", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_check_for_own_email() {
    let app = setup_app();
    app.seed_user("boss@x.com", UserRole::Admin).await;
    app.seed_user("student@x.com", UserRole::None).await;

    let token = app.token_for("boss@x.com");
    let (status, body) = app.get("/users/admin/boss@x.com", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "admin": true }));

    let token = app.token_for("student@x.com");
    let (status, body) = app.get("/users/admin/student@x.com", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "admin": false }));
}

#[tokio::test]
async fn test_admin_check_for_other_email_is_forbidden() {
    let app = setup_app();
    app.seed_user("boss@x.com", UserRole::Admin).await;

    let token = app.token_for("student@x.com");
    let (status, _) = app.get("/users/admin/boss@x.com", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
