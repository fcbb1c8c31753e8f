// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Shared test harness.

pub mod fixtures;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use warden_api::auth::{JwtConfig, JwtManager};
use warden_api::{ApiConfig, ApiServer, AppState};
use warden_core::MemoryUserStore;

/// Signing secret shared by every test app.
pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-must-be-at-least-32-chars";

// =============================================================================
// TestApp
// =============================================================================

/// A fully wired application over a fresh in-memory store.
pub struct TestApp {
    /// The assembled router, middleware included.
    pub router: Router,
    /// Direct handle to the store backing the router.
    pub store: Arc<MemoryUserStore>,
    /// The token codec the router uses; tests use it to mint crafted tokens.
    pub jwt: Arc<JwtManager>,
}

/// Builds a fresh test application.
pub fn test_app() -> TestApp {
    let config = ApiConfig::default().with_jwt(JwtConfig::new(TEST_SECRET));

    let store = Arc::new(MemoryUserStore::new());
    let jwt = Arc::new(JwtManager::new(config.jwt.clone()).expect("jwt manager"));

    let state = AppState::builder()
        .config(config)
        .jwt_manager(jwt.clone())
        .store(store.clone())
        .build()
        .expect("app state");

    TestApp {
        router: ApiServer::new(state).router(),
        store,
        jwt,
    }
}

impl TestApp {
    /// Sends a request through the router.
    ///
    /// `token` becomes an `Authorization: Bearer` header; `body` a JSON
    /// payload.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        self.router.clone().oneshot(request).await.expect("response")
    }

    /// POST helper.
    pub async fn post(&self, path: &str, body: Value) -> Response<Body> {
        self.request(Method::POST, path, None, Some(body)).await
    }

    /// GET helper with an optional bearer token.
    pub async fn get(&self, path: &str, token: Option<&str>) -> Response<Body> {
        self.request(Method::GET, path, token, None).await
    }

    /// Registers an identity and returns its token.
    pub async fn signup(&self, payload: Value) -> String {
        let response = self.post("/api/v1/users/signup", payload).await;
        assert_eq!(response.status(), StatusCode::CREATED, "signup failed");

        let body = body_json(response).await;
        body["token"].as_str().expect("token").to_string()
    }

    /// Logs in and returns the token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post(
                "/api/v1/users/login",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK, "login failed");

        let body = body_json(response).await;
        body["token"].as_str().expect("token").to_string()
    }
}

// =============================================================================
// Response helpers
// =============================================================================

/// Reads a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Returns the `Set-Cookie` header value, if any.
pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}
