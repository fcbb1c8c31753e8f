// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication primitives.
//!
//! This module provides:
//! - JWT claims, signing, and verification
//! - The per-request authentication context
//! - Session cookie construction

mod claims;
mod context;
mod cookie;
mod jwt;

pub use claims::Claims;
pub use context::AuthContext;
pub use cookie::{clear_session_cookie, session_cookie, SESSION_COOKIE};
pub use jwt::{JwtConfig, JwtManager, TokenError};
