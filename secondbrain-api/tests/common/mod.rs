//! Common test utilities for integration tests
//!
//! Every test gets a fresh router over an in-memory store, so tests run
//! without a database and do not share state.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use secondbrain_api::{
    app::{build_router, AppState},
    config::{ApiConfig, Config, DatabaseConfig, JwtConfig, LISTEN_PORT},
};
use secondbrain_shared::store::{BrainStore, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const TEST_PASSWORD: &str = "Passw0rd!";

/// Test context holding the router and its backing store
pub struct TestContext {
    pub app: Router,
    pub store: Arc<MemoryStore>,
    pub config: Config,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_expiration(None)
    }

    pub fn with_expiration(expiration_hours: Option<i64>) -> Self {
        let config = test_config(expiration_hours);
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone() as Arc<dyn BrainStore>, config.clone());

        Self {
            app: build_router(state),
            store,
            config,
        }
    }

    /// Sends one request and returns the status with the parsed JSON body
    ///
    /// An empty body is returned as `Value::Null`.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, body)
    }

    pub async fn signup(&self, username: &str, email: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/api/v1/signup",
            None,
            Some(json!({ "username": username, "email": email, "password": password })),
        )
        .await
    }

    pub async fn signin(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/api/v1/signin",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Signs a user up and in, returning the token
    pub async fn register(&self, username: &str, email: &str) -> String {
        let (status, body) = self.signup(username, email, TEST_PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "signup failed: {}", body);

        let (status, body) = self.signin(email, TEST_PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "signin failed: {}", body);

        body["token"].as_str().unwrap().to_string()
    }

    /// Saves a content item and returns its id
    pub async fn add_content(&self, token: &str, kind: &str, title: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/content",
                Some(token),
                Some(json!({ "type": kind, "link": "https://example.com/item", "title": title })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create content failed: {}", body);

        body["contentId"].as_str().unwrap().to_string()
    }

    pub async fn list_content(&self, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, "/api/v1/content", Some(token), None).await
    }

    pub async fn share(&self, token: &str, share: bool) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/api/v1/brain/share",
            Some(token),
            Some(json!({ "share": share })),
        )
        .await
    }
}

fn test_config(expiration_hours: Option<i64>) -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: LISTEN_PORT,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiration_hours,
        },
    }
}
