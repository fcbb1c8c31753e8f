// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Middleware implementations for the API server.
//!
//! Two gates guard every protected route:
//!
//! - [`AuthLayer`]: token verification plus live re-resolution of the
//!   identity from the store
//! - [`RequireRole`]: per-route role allow-list enforcement

mod auth;
mod rbac;

pub use auth::{AuthLayer, AuthMiddleware};
pub use rbac::{RequireRole, RequireRoleMiddleware};
