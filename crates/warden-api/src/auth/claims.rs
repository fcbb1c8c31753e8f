// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! JWT claims structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warden_core::Role;

/// The payload of a warden credential token.
///
/// A token is minted once per successful registration or login and never
/// mutated; everything a gate needs to start evaluating a request is here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the identity id.
    pub sub: Uuid,

    /// The subject's role at issuance time.
    ///
    /// Gates re-resolve the identity and use its live role for the actual
    /// authorization decision; this claim is kept for diagnostics and for
    /// stateless consumers.
    pub role: Role,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issuer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    /// Creates claims for an identity, expiring `expires_in_secs` from now.
    pub fn new(user_id: Uuid, role: Role, expires_in_secs: i64) -> Self {
        let now = Utc::now().timestamp();

        Self {
            sub: user_id,
            role,
            iat: now,
            exp: now + expires_in_secs,
            iss: None,
        }
    }

    /// Sets the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.iss = Some(issuer.into());
        self
    }

    /// Returns the subject identity id.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns `true` if the token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Returns the issue time as a `DateTime`.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    /// Returns the expiration time as a `DateTime`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

// =============================================================================
// Tests
// =============================================================================
