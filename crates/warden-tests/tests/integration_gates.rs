// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Gate integration tests
//!
//! End-to-end tests for the authentication and authorization gates:
//!
//! - `test_protect_*`: token verification and identity re-resolution
//! - `test_rbac_*`: per-route role allow-lists
//! - `test_stale_*`: invalidation on password change

use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use warden_api::auth::Claims;
use warden_core::store::UserStore;
use warden_core::Role;
use warden_tests::common::{body_json, fixtures, test_app};

// =============================================================================
// Authentication gate
// =============================================================================

#[tokio::test]
async fn test_protect_rejects_missing_token() {
    let app = test_app();

    let response = app.get("/api/v1/protected", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "You are not logged in! Please log in to get access."
    );
}

#[tokio::test]
async fn test_protect_rejects_garbage_token() {
    let app = test_app();

    let response = app.get("/api/v1/protected", Some("invalidToken")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid token.");
}

#[tokio::test]
async fn test_protect_rejects_expired_token() {
    let app = test_app();
    app.signup(fixtures::signup_payload("jane@example.com")).await;
    let user = app
        .store
        .find_by_email("jane@example.com")
        .await
        .unwrap()
        .unwrap();

    // Same subject, same signer, expiry in the past.
    let claims = Claims::new(user.id, user.role, -3600).with_issuer("warden");
    let expired = app.jwt.sign(&claims).unwrap();

    let response = app.get("/api/v1/protected", Some(&expired)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Your token has expired! Please log in again."
    );
}

#[tokio::test]
async fn test_protect_accepts_valid_token() {
    let app = test_app();
    let token = app.signup(fixtures::signup_payload("jane@example.com")).await;

    let response = app.get("/api/v1/protected", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protect_accepts_cookie_transport() {
    let app = test_app();
    let token = app.signup(fixtures::signup_payload("jane@example.com")).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/protected")
        .header(header::COOKIE, format!("jwt={}", token))
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protect_rejects_token_of_deleted_user() {
    let app = test_app();
    let token = app.signup(fixtures::signup_payload("jane@example.com")).await;

    let user = app
        .store
        .find_by_email("jane@example.com")
        .await
        .unwrap()
        .unwrap();
    app.store.deactivate(user.id).await.unwrap();

    let response = app.get("/api/v1/protected", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "The user belonging to this token does no longer exist."
    );
}

// =============================================================================
// Staleness on password change
// =============================================================================

#[tokio::test]
async fn test_stale_token_rejected_after_password_change() {
    let app = test_app();
    let old_token = app.signup(fixtures::signup_payload("jane@example.com")).await;

    // The change must land in a later second than the old token's iat for
    // the staleness comparison to observe it.
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/users/change-password",
            Some(&old_token),
            Some(json!({
                "currentPassword": "password",
                "newPassword": "a-new-password",
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let fresh_token = body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    // The pre-change token is cryptographically valid but stale.
    let response = app.get("/api/v1/users/me", Some(&old_token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "User recently changed password! Please log in again."
    );

    // The token issued by the change itself stays valid.
    let response = app.get("/api/v1/users/me", Some(&fresh_token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    // And the new password logs in while the old one fails.
    app.login("jane@example.com", "a-new-password").await;
    let response = app
        .post(
            "/api/v1/users/login",
            json!({ "email": "jane@example.com", "password": "password" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_change_password_requires_correct_current_password() {
    let app = test_app();
    let token = app.signup(fixtures::signup_payload("jane@example.com")).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/users/change-password",
            Some(&token),
            Some(json!({
                "currentPassword": "not-my-password",
                "newPassword": "a-new-password",
            })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Authorization gate
// =============================================================================

#[tokio::test]
async fn test_rbac_supervisor_allowed_on_shared_route() {
    let app = test_app();
    let token = app.signup(fixtures::signup_payload("supervisor@email.com")).await;

    let response = app.get("/api/v1/products/list", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn test_rbac_admin_allowed_on_shared_route() {
    let app = test_app();
    let token = app
        .signup(fixtures::admin_signup_payload("admin@email.com"))
        .await;

    let response = app.get("/api/v1/products/list", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rbac_supervisor_forbidden_on_admin_route() {
    let app = test_app();
    let token = app.signup(fixtures::signup_payload("supervisor@email.com")).await;

    let response = app
        .request(Method::DELETE, "/api/v1/products/delete", Some(&token), None)
        .await;

    // Forbidden, not unauthenticated: the identity is known but lacks the role.
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "You do not have permission to perform this action"
    );
}

#[tokio::test]
async fn test_rbac_admin_allowed_on_admin_route() {
    let app = test_app();
    let token = app
        .signup(fixtures::admin_signup_payload("admin@email.com"))
        .await;

    let response = app
        .request(Method::DELETE, "/api/v1/products/delete", Some(&token), None)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rbac_gated_route_without_token_is_unauthorized() {
    let app = test_app();

    let response = app.get("/api/v1/products/list", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rbac_signup_role_claim_is_honored() {
    // The signup payload's role lands in the store, so gate decisions based
    // on the live record see it.
    let app = test_app();
    app.signup(fixtures::admin_signup_payload("admin@email.com")).await;

    let user = app
        .store
        .find_by_email("admin@email.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.role, Role::Admin);
}
