// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API error types and handling.
//!
//! This module is the single place where component failures are translated
//! into wire shape: every typed failure maps to an HTTP status, an error
//! code, and a client-safe message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use warden_core::StoreError;

use crate::auth::TokenError;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// ApiError
// =============================================================================

/// API error type with HTTP status code mapping.
///
/// Designed to be returned from handlers and middleware and automatically
/// converted to the uniform JSON error response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404).
    #[error("Resource not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// Bad request (400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Duplicate unique field (400).
    #[error("Duplicate field value: {field}")]
    Duplicate {
        /// The field that collided.
        field: String,
    },

    /// Unauthenticated (401).
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Error message.
        message: String,
    },

    /// Authenticated but not permitted (403).
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Error message.
        message: String,
    },

    /// Validation error (422).
    #[error("Validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
        /// Field-specific errors.
        #[source]
        errors: Option<ValidationErrors>,
    },

    /// Internal server error (500).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message (for logging, never user-facing).
        message: String,
    },
}

impl ApiError {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a not found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a duplicate-field error.
    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
        }
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            errors: None,
        }
    }

    /// Creates a validation error with field errors.
    pub fn validation_with_errors(message: impl Into<String>, errors: ValidationErrors) -> Self {
        Self::Validation {
            message: message.into(),
            errors: Some(errors),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            // Duplicate unique field reports as a bad request, matching the
            // externally observed contract of registration.
            ApiError::Duplicate { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for categorization.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::Duplicate { .. } => "DUPLICATE_FIELD",
            ApiError::Unauthorized { .. } => "UNAUTHORIZED",
            ApiError::Forbidden { .. } => "FORBIDDEN",
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Returns the client-facing message.
    ///
    /// Operational failures pass their message through; internal failures
    /// are always replaced with a generic message — diagnostics go to the
    /// log, never to the wire.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NotFound { resource } => {
                format!("Can't find {} on this server!", resource)
            }
            ApiError::BadRequest { message } => message.clone(),
            ApiError::Duplicate { field } => {
                format!("Duplicate field value: {}. Please use another value!", field)
            }
            ApiError::Unauthorized { message } => message.clone(),
            ApiError::Forbidden { message } => message.clone(),
            ApiError::Validation { message, .. } => message.clone(),
            ApiError::Internal { .. } => {
                "Something went wrong! Please try again later.".to_string()
            }
        }
    }

    /// Returns `true` if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Internal { .. })
    }

    /// Returns the `status` discriminator used in response bodies:
    /// `"fail"` for client errors, `"error"` for server errors.
    pub fn status_label(&self) -> &'static str {
        if self.is_server_error() {
            "error"
        } else {
            "fail"
        }
    }
}

// =============================================================================
// IntoResponse Implementation
// =============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        if self.is_server_error() {
            tracing::error!(
                error = %self,
                error_code = error_code,
                status = %status,
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                error_code = error_code,
                status = %status,
                "Client error occurred"
            );
        }

        let body = ErrorResponseBody {
            status: self.status_label().to_string(),
            code: error_code.to_string(),
            message: self.user_message(),
            errors: match self {
                ApiError::Validation {
                    errors: Some(errors),
                    ..
                } => Some(errors.fields),
                _ => None,
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Error Response Body
// =============================================================================

/// The uniform JSON error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseBody {
    /// `"fail"` for client errors, `"error"` for server errors.
    pub status: String,
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Per-field validation errors (422 only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Collection of field validation errors.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ValidationErrors {
    /// Field-specific errors.
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field error.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Returns `true` if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts to an `ApiError` if any errors were collected.
    pub fn into_result(self) -> ApiResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_with_errors("Invalid Data", self))
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} validation errors", self.fields.len())
    }
}

/// A single field validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name, as spelled on the wire.
    pub field: String,
    /// Error message.
    pub message: String,
}

// =============================================================================
// From Implementations
// =============================================================================

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail { .. } => ApiError::duplicate("email"),
            StoreError::NotFound { .. } => {
                // A store-level miss inside an authenticated flow means the
                // identity vanished between resolution and mutation.
                ApiError::unauthorized("The user belonging to this token does no longer exist.")
            }
            StoreError::Hash { message } | StoreError::Backend { message } => {
                ApiError::internal(message)
            }
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::unauthorized(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!("Invalid JSON: {}", err))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::not_found("/nope").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::bad_request("invalid").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::duplicate("email").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthorized("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::forbidden("no access").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::validation("invalid field").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::internal("crash").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_is_suppressed() {
        let err = ApiError::internal("database password is hunter2");
        assert_eq!(
            err.user_message(),
            "Something went wrong! Please try again later."
        );
    }

    #[test]
    fn test_status_label() {
        assert_eq!(ApiError::bad_request("x").status_label(), "fail");
        assert_eq!(ApiError::internal("x").status_label(), "error");
    }

    #[test]
    fn test_validation_errors_collection() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());
        assert!(errors.clone().into_result().is_ok());

        errors.add("email", "Please provide a valid email");
        errors.add("password", "Password must be at least 8 characters");

        assert_eq!(errors.fields.len(), 2);
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_store_error_mapping() {
        let dup: ApiError = StoreError::duplicate_email("a@b.com").into();
        assert_eq!(dup.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(dup.error_code(), "DUPLICATE_FIELD");

        let gone: ApiError = StoreError::not_found(Uuid::now_v7()).into();
        assert_eq!(gone.status_code(), StatusCode::UNAUTHORIZED);

        let internal: ApiError = StoreError::backend("connection refused").into();
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_token_error_mapping() {
        let expired: ApiError = TokenError::Expired.into();
        assert_eq!(expired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            expired.user_message(),
            "Your token has expired! Please log in again."
        );

        let malformed: ApiError = TokenError::Malformed.into();
        assert_eq!(malformed.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(malformed.user_message(), "Invalid token.");
    }
}
