// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Typed failures for identity store operations.

use thiserror::Error;
use uuid::Uuid;

/// Errors returned by [`UserStore`](crate::store::UserStore) implementations.
///
/// Every variant is an operational failure: callers translate these into
/// wire-level errors, they are never panics in disguise.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An identity with this email already exists.
    #[error("duplicate email: {email}")]
    DuplicateEmail {
        /// The (normalized) email that collided.
        email: String,
    },

    /// No active identity with this id.
    #[error("user not found: {id}")]
    NotFound {
        /// The id that failed to resolve.
        id: Uuid,
    },

    /// Password hashing or verification infrastructure failed.
    #[error("password hashing failed: {message}")]
    Hash {
        /// Underlying error description.
        message: String,
    },

    /// The storage backend itself failed.
    #[error("store backend error: {message}")]
    Backend {
        /// Underlying error description.
        message: String,
    },
}

impl StoreError {
    /// Creates a duplicate-email error.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    /// Creates a hashing error.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }

    /// Creates a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Returns `true` if this failure indicates an infrastructure problem
    /// rather than a client mistake.
    pub fn is_internal(&self) -> bool {
        matches!(self, StoreError::Hash { .. } | StoreError::Backend { .. })
    }
}

// =============================================================================
// Tests
// =============================================================================
