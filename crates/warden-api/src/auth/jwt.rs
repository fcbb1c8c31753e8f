// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! JWT signing and verification.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use warden_core::{Role, User};

use super::Claims;
use crate::error::{ApiError, ApiResult};

// =============================================================================
// TokenError
// =============================================================================

/// A token verification failure.
///
/// Both variants surface as 401 at the HTTP boundary, but callers must be
/// able to tell a tampered or garbled token apart from a merely expired one.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token's expiry has passed.
    #[error("Your token has expired! Please log in again.")]
    Expired,

    /// The token is malformed, carries a bad signature, or fails any other
    /// structural validation.
    #[error("Invalid token.")]
    Malformed,
}

// =============================================================================
// JwtConfig
// =============================================================================

/// JWT configuration.
///
/// Loaded once at startup; the secret and TTL are immutable for the life of
/// the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Symmetric secret for signing tokens.
    #[serde(skip_serializing)]
    pub secret: String,
    /// Token issuer.
    pub issuer: String,
    /// Token time-to-live in seconds.
    pub ttl_secs: i64,
    /// Clock skew tolerance in seconds.
    pub leeway_secs: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(), // Must be set by the operator
            issuer: "warden".to_string(),
            ttl_secs: 3600, // 1 hour
            leeway_secs: 30,
        }
    }
}

impl JwtConfig {
    /// Creates a new configuration with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Sets the time-to-live.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl_secs = ttl.as_secs() as i64;
        self
    }

    /// Sets the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        if self.secret.is_empty() {
            return Err(ApiError::internal("JWT secret is not configured"));
        }
        if self.secret.len() < 32 {
            tracing::warn!("JWT secret is shorter than recommended (32 bytes)");
        }
        if self.ttl_secs <= 0 {
            return Err(ApiError::internal("JWT ttl_secs must be positive"));
        }
        Ok(())
    }
}

// =============================================================================
// JwtManager
// =============================================================================

/// The token codec: signs and verifies warden credential tokens.
///
/// Built once at startup from [`JwtConfig`] and shared by reference;
/// verification is a pure computation over the request input and these
/// immutable keys.
#[derive(Clone)]
pub struct JwtManager {
    config: Arc<JwtConfig>,
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl JwtManager {
    /// Creates a new manager with the given configuration.
    pub fn new(config: JwtConfig) -> ApiResult<Self> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.leeway = config.leeway_secs;
        validation.validate_aud = false;

        Ok(Self {
            config: Arc::new(config),
            encoding_key: Arc::new(encoding_key),
            decoding_key: Arc::new(decoding_key),
            validation: Arc::new(validation),
        })
    }

    /// Signs a prepared set of claims.
    pub fn sign(&self, claims: &Claims) -> ApiResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| ApiError::internal(format!("Failed to sign token: {}", e)))
    }

    /// Issues a token for an identity: `{sub, role, iat = now, exp = now + ttl}`.
    pub fn issue(&self, user_id: Uuid, role: Role) -> ApiResult<String> {
        let claims =
            Claims::new(user_id, role, self.config.ttl_secs).with_issuer(&self.config.issuer);
        self.sign(&claims)
    }

    /// Issues a token for a user record.
    pub fn issue_for(&self, user: &User) -> ApiResult<String> {
        self.issue(user.id, user.role)
    }

    /// Verifies a token, checking signature integrity before expiry.
    ///
    /// The two rejection modes stay distinguishable: a tampered, garbled, or
    /// wrong-issuer token is [`TokenError::Malformed`], a token past its
    /// expiry is [`TokenError::Expired`].
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }

    /// Returns the configured token time-to-live in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.config.ttl_secs
    }
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("issuer", &self.config.issuer)
            .field("ttl_secs", &self.config.ttl_secs)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig::new("test-secret-key-that-is-long-enough-for-testing")
    }

    #[test]
    fn test_issue_and_verify() {
        let manager = JwtManager::new(test_config()).unwrap();
        let id = Uuid::now_v7();

        let token = manager.issue(id, Role::Admin).unwrap();
        let claims = manager.verify(&token).unwrap();

        assert_eq!(claims.sub, id);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.iss.as_deref(), Some("warden"));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let result = JwtManager::new(JwtConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token() {
        let manager = JwtManager::new(test_config()).unwrap();

        let claims = Claims::new(Uuid::now_v7(), Role::Supervisor, -3600).with_issuer("warden");
        let token = manager.sign(&claims).unwrap();

        assert!(matches!(manager.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let manager = JwtManager::new(test_config()).unwrap();

        assert!(matches!(
            manager.verify("not.a.jwt"),
            Err(TokenError::Malformed)
        ));
        assert!(matches!(manager.verify(""), Err(TokenError::Malformed)));
    }

    #[test]
    fn test_tampered_token_is_malformed() {
        let manager = JwtManager::new(test_config()).unwrap();
        let token = manager.issue(Uuid::now_v7(), Role::Supervisor).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let tampered = format!("{}.eyJzdWIiOiJ4In0.{}", parts[0], parts[2]);

        assert!(matches!(
            manager.verify(&tampered),
            Err(TokenError::Malformed)
        ));
    }

    #[test]
    fn test_wrong_secret_is_malformed() {
        let signer = JwtManager::new(JwtConfig::new("secret-one-for-testing-purposes")).unwrap();
        let verifier = JwtManager::new(JwtConfig::new("secret-two-for-testing-purposes")).unwrap();

        let token = signer.issue(Uuid::now_v7(), Role::Supervisor).unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(TokenError::Malformed)
        ));
    }

    #[test]
    fn test_wrong_issuer_is_malformed() {
        let manager = JwtManager::new(test_config()).unwrap();

        let claims = Claims::new(Uuid::now_v7(), Role::Supervisor, 3600).with_issuer("someone-else");
        let token = manager.sign(&claims).unwrap();

        assert!(matches!(
            manager.verify(&token),
            Err(TokenError::Malformed)
        ));
    }
}
