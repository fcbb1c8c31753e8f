// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API handlers for all endpoints.
//!
//! - [`auth`]: registration, login, logout, current user, password change
//! - [`products`]: the role-gated demo resources
//! - [`health`]: liveness endpoint

mod auth;
mod health;
mod products;

pub use auth::*;
pub use health::*;
pub use products::*;
