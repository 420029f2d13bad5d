#![allow(dead_code)]

use assignment_backend::app::{build_router, Repositories};
use assignment_backend::config::{CorsConfig, JwtConfig};
use assignment_backend::model::user::{User, UserRole};
use assignment_backend::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt; // for .oneshot()

pub struct TestApp {
    pub router: Router,
    pub repositories: Repositories,
    pub jwt: JwtTokenUtilsImpl,
}

pub fn setup_app() -> TestApp {
    let repositories = Repositories::in_memory();
    let router = build_router(repositories.clone(), JwtConfig::default(), &CorsConfig::default());
    TestApp {
        router,
        repositories,
        jwt: JwtTokenUtilsImpl::new(JwtConfig::default()),
    }
}

impl TestApp {
    pub fn token_for(&self, email: &str) -> String {
        let payload = json!({ "email": email });
        self.jwt.issue_token(payload.as_object().cloned().unwrap()).unwrap()
    }

    pub async fn seed_user(&self, email: &str, role: UserRole) {
        self.repositories
            .users
            .insert(User {
                id: None,
                email: email.to_string(),
                name: Some("Seeded".to_string()),
                photo_url: None,
                role,
                extra: Default::default(),
            })
            .await
            .unwrap();
    }

    /// Sends one request; JSON bodies are parsed, anything else comes back as a string.
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request(Method::GET, uri, None, token)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request(Method::DELETE, uri, None, token)).await
    }

    pub async fn post(&self, uri: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request(Method::POST, uri, Some(body), token)).await
    }

    pub async fn put(&self, uri: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request(Method::PUT, uri, Some(body), token)).await
    }

    pub async fn patch(&self, uri: &str, body: Option<Value>, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request(Method::PATCH, uri, body, token)).await
    }
}

pub fn request(method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
