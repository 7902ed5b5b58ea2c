/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - A router backed by a fresh in-memory store per test
/// - Static file paths pointing at the workspace `views/` and `public/`
/// - Request helpers that decode JSON bodies

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use exercise_tracker_api::app::{build_router, AppState};
use exercise_tracker_api::config::Config;
use serde_json::Value;
use std::path::PathBuf;
use tower::ServiceExt;

/// Decoded response
pub struct TestResponse {
    pub status: StatusCode,
    pub text: String,
    pub json: Value,
}

/// Test context containing the app under test
pub struct TestContext {
    pub app: Router,
}

impl TestContext {
    /// Creates a new test context with an empty in-memory store
    pub fn new() -> Self {
        let workspace = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..");

        let mut config = Config::default();
        config.static_files.public_dir = workspace.join("public");
        config.static_files.index_page = workspace.join("views").join("index.html");

        let app = build_router(AppState::in_memory(config));
        TestContext { app }
    }

    /// Sends a request and decodes the body
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&body).into_owned();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);

        TestResponse { status, text, json }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Creates a user and returns its `_id`
    pub async fn create_user(&self, username: &str) -> String {
        let response = self
            .post_json("/api/users", serde_json::json!({ "username": username }))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);

        response.json["_id"].as_str().unwrap().to_string()
    }

    /// Appends an exercise and asserts success
    pub async fn add_exercise(&self, user_id: &str, body: Value) -> Value {
        let response = self
            .post_json(&format!("/api/users/{}/exercises", user_id), body)
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);

        response.json
    }
}
