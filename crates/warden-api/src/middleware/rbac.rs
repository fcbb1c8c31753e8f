// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Role-based access control middleware.
//!
//! Each protected route declares its role allow-list at registration time.
//! The check is pure set membership against the re-resolved identity's
//! current role — roles carry no ordering, and a role change takes effect on
//! the next request rather than at token expiry.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use warden_core::Role;

use crate::auth::AuthContext;
use crate::error::ApiError;

// =============================================================================
// RequireRole
// =============================================================================

/// Layer enforcing a fixed role allow-list.
///
/// Must sit inside [`AuthLayer`](crate::middleware::AuthLayer): it reads the
/// `AuthContext` the authentication gate attaches and rejects with 401 if
/// none is present.
#[derive(Clone)]
pub struct RequireRole {
    allowed: Arc<Vec<Role>>,
}

impl RequireRole {
    /// Creates a layer permitting any of the given roles.
    pub fn any(roles: impl Into<Vec<Role>>) -> Self {
        Self {
            allowed: Arc::new(roles.into()),
        }
    }

    /// Creates a layer permitting a single role.
    pub fn only(role: Role) -> Self {
        Self::any(vec![role])
    }
}

impl<S> Layer<S> for RequireRole {
    type Service = RequireRoleMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequireRoleMiddleware {
            inner,
            allowed: self.allowed.clone(),
        }
    }
}

// =============================================================================
// RequireRoleMiddleware
// =============================================================================

/// Middleware enforcing the role allow-list.
#[derive(Clone)]
pub struct RequireRoleMiddleware<S> {
    inner: S,
    allowed: Arc<Vec<Role>>,
}

impl<S> Service<Request<Body>> for RequireRoleMiddleware<S>
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

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let allowed = self.allowed.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let auth_ctx = req.extensions().get::<AuthContext>().cloned();

            match auth_ctx {
                Some(ctx) if ctx.is_allowed(&allowed) => inner.call(req).await,
                Some(ctx) => {
                    tracing::warn!(
                        user_id = %ctx.user_id(),
                        role = %ctx.role(),
                        allowed = ?allowed.as_slice(),
                        "Role not permitted"
                    );
                    Ok(ApiError::forbidden(
                        "You do not have permission to perform this action",
                    )
                    .into_response())
                }
                None => {
                    tracing::warn!("No auth context found, denying access");
                    Ok(ApiError::unauthorized(
                        "You are not logged in! Please log in to get access.",
                    )
                    .into_response())
                }
            }
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
