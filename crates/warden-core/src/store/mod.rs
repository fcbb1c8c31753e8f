// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Identity store abstraction.
//!
//! The [`UserStore`] trait is the seam between warden and whatever actually
//! persists identities. The crate ships an in-memory implementation used by
//! tests and the development server; a production deployment substitutes a
//! database-backed one behind the same trait.
//!
//! # Contract
//!
//! - Emails are unique and normalized to lowercase at this boundary.
//! - Every read used by the request gates applies the active-only filter:
//!   a deactivated identity is indistinguishable from a missing one.
//! - Password hashing and `password_changed_at` stamping happen inside
//!   `create`/`update_password` as explicit, ordered steps.

use std::fmt::Debug;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::user::{NewUser, User};

mod memory;

pub use memory::MemoryUserStore;

// =============================================================================
// UserStore Trait
// =============================================================================

/// Persistent identity storage.
///
/// Implementations own their concurrency control: duplicate-email races are
/// resolved here (unique index, write lock, ...), not by callers.
#[async_trait]
pub trait UserStore: Send + Sync + Debug {
    /// Creates a new identity.
    ///
    /// Steps, in order: normalize the email to lowercase, reject a
    /// duplicate, hash the password, stamp `created_at`, persist.
    ///
    /// # Returns
    ///
    /// - `Ok(User)` with the freshly hashed record
    /// - `Err(StoreError::DuplicateEmail)` if the email is taken
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Looks up an active identity by id.
    ///
    /// Returns `Ok(None)` for missing **and** for deactivated identities;
    /// the caller cannot tell them apart.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Looks up an active identity by email (lowercase-normalized before
    /// matching).
    ///
    /// This is the login read: the returned record carries the password
    /// hash, and login is the only caller that may inspect it.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Replaces the identity's password.
    ///
    /// Steps, in order: hash the new password, stamp `password_changed_at`
    /// one second in the past, persist. The back-dated stamp keeps a token
    /// issued immediately after the change valid while every earlier token
    /// becomes stale.
    async fn update_password(&self, id: Uuid, new_password: &str) -> Result<User, StoreError>;

    /// Deactivates an identity (soft delete).
    ///
    /// The record is retained but disappears from every read above.
    async fn deactivate(&self, id: Uuid) -> Result<(), StoreError>;

    /// Returns the number of active identities.
    async fn count(&self) -> Result<usize, StoreError>;
}
