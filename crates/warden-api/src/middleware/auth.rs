// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication middleware.
//!
//! Verifying the token signature is necessary but not sufficient: the gate
//! re-resolves the identity from the store on every request, so a deleted or
//! deactivated account — or one whose password changed after the token was
//! issued — is rejected even while its token is cryptographically valid.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::{header, Request},
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use warden_core::UserStore;

use crate::auth::{AuthContext, JwtManager, SESSION_COOKIE};
use crate::error::ApiError;

// =============================================================================
// AuthLayer
// =============================================================================

/// Layer applying the authentication gate.
///
/// Wrap the protected sub-router with this layer; routes that must stay
/// public simply live outside it.
#[derive(Clone)]
pub struct AuthLayer {
    jwt_manager: Arc<JwtManager>,
    store: Arc<dyn UserStore>,
}

impl AuthLayer {
    /// Creates a new auth layer.
    pub fn new(jwt_manager: Arc<JwtManager>, store: Arc<dyn UserStore>) -> Self {
        Self { jwt_manager, store }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            jwt_manager: self.jwt_manager.clone(),
            store: self.store.clone(),
        }
    }
}

// =============================================================================
// AuthMiddleware
// =============================================================================

/// Middleware enforcing the authentication gate.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    jwt_manager: Arc<JwtManager>,
    store: Arc<dyn UserStore>,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let jwt_manager = self.jwt_manager.clone();
        let store = self.store.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // 1) Locate a candidate token: Authorization header wins over
            //    the session cookie.
            let token = match extract_token(&req) {
                Some(token) => token,
                None => {
                    tracing::debug!("No authorization token provided");
                    return Ok(ApiError::unauthorized(
                        "You are not logged in! Please log in to get access.",
                    )
                    .into_response());
                }
            };

            // 2) Verify signature and expiry.
            let claims = match jwt_manager.verify(&token) {
                Ok(claims) => claims,
                Err(e) => {
                    tracing::debug!(error = %e, "Token verification failed");
                    return Ok(ApiError::from(e).into_response());
                }
            };

            // 3) Re-resolve the identity; deactivated accounts come back as
            //    missing here.
            let user = match store.find_by_id(claims.sub).await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    tracing::debug!(user_id = %claims.sub, "Token subject no longer resolvable");
                    return Ok(ApiError::unauthorized(
                        "The user belonging to this token does no longer exist.",
                    )
                    .into_response());
                }
                Err(e) => return Ok(ApiError::from(e).into_response()),
            };

            // 4) A password change at or after issuance invalidates the token.
            if user.changed_password_after(claims.iat) {
                tracing::debug!(user_id = %user.id, "Token predates password change");
                return Ok(ApiError::unauthorized(
                    "User recently changed password! Please log in again.",
                )
                .into_response());
            }

            // Grant access: downstream handlers and the RBAC gate see the
            // live identity.
            req.extensions_mut().insert(AuthContext::new(user, claims));

            inner.call(req).await
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Extracts the candidate token from the request.
///
/// `Authorization: Bearer <token>` takes precedence; the `jwt` cookie is the
/// fallback transport for browser clients.
fn extract_token<B>(req: &Request<B>) -> Option<String> {
    bearer_token(req).or_else(|| cookie_token(req))
}

/// Extracts the bearer token from the Authorization header.
fn bearer_token<B>(req: &Request<B>) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer ").map(|s| s.to_string()))
}

/// Extracts the session token from the cookie header.
fn cookie_token<B>(req: &Request<B>) -> Option<String> {
    let cookie_header = req
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())?;

    cookie_header.split(';').map(str::trim).find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        if name.trim() == SESSION_COOKIE {
            Some(value.trim().to_string())
        } else {
            None
        }
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    use axum::http::{HeaderValue, StatusCode};
    use tower::ServiceExt;

    use warden_core::{MemoryUserStore, NewUser, Role};

    use crate::auth::{Claims, JwtConfig};

    fn test_jwt() -> Arc<JwtManager> {
        Arc::new(
            JwtManager::new(JwtConfig::new(
                "test-secret-key-that-is-long-enough-for-testing",
            ))
            .unwrap(),
        )
    }

    fn ok_service() -> impl Service<
        Request<Body>,
        Response = Response,
        Error = Infallible,
        Future = impl Future<Output = Result<Response, Infallible>> + Send,
    > + Clone
           + Send {
        tower::service_fn(|req: Request<Body>| async move {
            // Echo whether the gate attached a context.
            let authed = req.extensions().get::<AuthContext>().is_some();
            assert!(authed, "handler reached without auth context");
            Ok::<_, Infallible>(Response::new(Body::empty()))
        })
    }

    fn request_with_header(value: &str) -> Request<Body> {
        let mut req = Request::builder().uri("/test").body(Body::empty()).unwrap();
        req.headers_mut()
            .insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        req
    }

    #[test]
    fn test_bearer_token_extraction() {
        let req = Request::builder().uri("/test").body(Body::empty()).unwrap();
        assert!(bearer_token(&req).is_none());

        let req = request_with_header("Basic abc");
        assert!(bearer_token(&req).is_none());

        let req = request_with_header("Bearer mytoken123");
        assert_eq!(bearer_token(&req), Some("mytoken123".to_string()));
    }

    #[test]
    fn test_cookie_token_extraction() {
        let mut req = Request::builder().uri("/test").body(Body::empty()).unwrap();
        req.headers_mut().insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; jwt=cookie-token; lang=en"),
        );

        assert_eq!(cookie_token(&req), Some("cookie-token".to_string()));
    }

    #[test]
    fn test_header_wins_over_cookie() {
        let mut req = request_with_header("Bearer header-token");
        req.headers_mut()
            .insert(header::COOKIE, HeaderValue::from_static("jwt=cookie-token"));

        assert_eq!(extract_token(&req), Some("header-token".to_string()));
    }

    #[tokio::test]
    async fn test_no_token_is_unauthorized() {
        let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        let mut service = AuthLayer::new(test_jwt(), store).layer(ok_service());

        let req = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let response = service.ready().await.unwrap().call(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_passes_and_attaches_context() {
        let jwt = test_jwt();
        let memory = Arc::new(MemoryUserStore::new());
        let user = memory
            .create(NewUser::new("jane", "smith", "jane@example.com", "password"))
            .await
            .unwrap();
        let store: Arc<dyn UserStore> = memory;

        let token = jwt.issue_for(&user).unwrap();
        let mut service = AuthLayer::new(jwt, store).layer(ok_service());

        let req = request_with_header(&format!("Bearer {}", token));
        let response = service.ready().await.unwrap().call(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_subject_is_unauthorized() {
        let jwt = test_jwt();
        let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());

        // Token is valid but its subject was never stored.
        let token = jwt.issue(uuid::Uuid::now_v7(), Role::Supervisor).unwrap();
        let mut service = AuthLayer::new(jwt, store).layer(ok_service());

        let req = request_with_header(&format!("Bearer {}", token));
        let response = service.ready().await.unwrap().call(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_deactivated_subject_is_unauthorized() {
        let jwt = test_jwt();
        let memory = Arc::new(MemoryUserStore::new());
        let user = memory
            .create(NewUser::new("jane", "smith", "jane@example.com", "password"))
            .await
            .unwrap();
        let token = jwt.issue_for(&user).unwrap();
        memory.deactivate(user.id).await.unwrap();
        let store: Arc<dyn UserStore> = memory;

        let mut service = AuthLayer::new(jwt, store).layer(ok_service());
        let req = request_with_header(&format!("Bearer {}", token));
        let response = service.ready().await.unwrap().call(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_stale_token_after_password_change() {
        let jwt = test_jwt();
        let memory = Arc::new(MemoryUserStore::new());
        let user = memory
            .create(NewUser::new("jane", "smith", "jane@example.com", "password"))
            .await
            .unwrap();

        // Token issued well before the change; deterministic regardless of
        // how fast the test runs.
        let claims = Claims {
            iat: chrono::Utc::now().timestamp() - 600,
            ..Claims::new(user.id, user.role, 3600)
        }
        .with_issuer("warden");
        let stale_token = jwt.sign(&claims).unwrap();

        memory.update_password(user.id, "brand-new-password").await.unwrap();
        let store: Arc<dyn UserStore> = memory;

        let mut service = AuthLayer::new(jwt, store).layer(ok_service());
        let req = request_with_header(&format!("Bearer {}", stale_token));
        let response = service.ready().await.unwrap().call(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let jwt = test_jwt();
        let memory = Arc::new(MemoryUserStore::new());
        let user = memory
            .create(NewUser::new("jane", "smith", "jane@example.com", "password"))
            .await
            .unwrap();
        let store: Arc<dyn UserStore> = memory;

        let claims = Claims::new(user.id, user.role, -3600).with_issuer("warden");
        let token = jwt.sign(&claims).unwrap();

        let mut service = AuthLayer::new(jwt, store).layer(ok_service());
        let req = request_with_header(&format!("Bearer {}", token));
        let response = service.ready().await.unwrap().call(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
