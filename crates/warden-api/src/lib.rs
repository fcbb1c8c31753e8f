// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # warden-api
//!
//! HTTP API server for the warden authentication service.
//!
//! This crate provides token issuance and verification, the authentication
//! and role-based authorization gates, and the REST surface for
//! registration, login, and the role-gated demo resources.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;
pub mod state;

pub use auth::{AuthContext, Claims, JwtConfig, JwtManager, TokenError};
pub use config::{ApiConfig, Environment};
pub use error::{ApiError, ApiResult, FieldError, ValidationErrors};
pub use response::{PublicUser, TokenResponse};
pub use server::{ApiServer, ApiServerBuilder};
pub use state::AppState;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
