// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warden_core::{Role, User};

// =============================================================================
// PublicUser
// =============================================================================

/// The outward representation of an identity.
///
/// This is the **only** serializable user shape in the system; it has no
/// password field by construction, so no response can ever leak a hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// Unique identifier.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Access role.
    pub role: Role,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

// =============================================================================
// TokenResponse
// =============================================================================

/// Response body for operations that issue a credential token.
///
/// Registration includes the created identity under `data`; login and
/// password change return the token alone.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Always `"success"`.
    pub status: String,
    /// The created or resolved identity, when the operation produces one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PublicUser>,
    /// The signed credential token.
    pub token: String,
}

impl TokenResponse {
    /// Creates a token-only response.
    pub fn new(token: String) -> Self {
        Self {
            status: "success".to_string(),
            data: None,
            token,
        }
    }

    /// Attaches the identity representation.
    pub fn with_user(mut self, user: &User) -> Self {
        self.data = Some(PublicUser::from(user));
        self
    }
}

// =============================================================================
// UserResponse
// =============================================================================

/// Response body for reads that return an identity without a token.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// Always `"success"`.
    pub status: String,
    /// The identity representation.
    pub data: PublicUser,
}

impl UserResponse {
    /// Creates a user response.
    pub fn new(user: &User) -> Self {
        Self {
            status: "success".to_string(),
            data: PublicUser::from(user),
        }
    }
}

// =============================================================================
// StatusResponse
// =============================================================================

/// Minimal `{status: "success"}` acknowledgement.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Always `"success"`.
    pub status: String,
}

impl StatusResponse {
    /// Creates a success acknowledgement.
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

// =============================================================================
// HealthResponse
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Version string.
    pub version: String,
}

impl HealthResponse {
    /// Creates a healthy response.
    pub fn healthy() -> Self {
        Self {
            status: "ok".to_string(),
            version: crate::VERSION.to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
