// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! In-memory identity store.
//!
//! Thread-safe reference implementation of [`UserStore`] backed by a
//! `parking_lot::RwLock<HashMap>`. Used by tests and the development
//! server; data is lost when the store is dropped.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::password::hash_password;
use crate::store::UserStore;
use crate::user::{NewUser, User};

// =============================================================================
// MemoryUserStore
// =============================================================================

/// An in-memory [`UserStore`] implementation.
///
/// Email uniqueness is serialized under the write lock, mirroring the
/// unique-index enforcement a database backend provides. Password hashing
/// runs before the lock is taken — Argon2 is deliberately slow and must not
/// stall concurrent reads.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if any record (active or not) holds this email.
    fn email_taken(users: &HashMap<Uuid, User>, email: &str) -> bool {
        users.values().any(|u| u.email == email)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let email = new_user.email.trim().to_lowercase();

        // Step 1: hash outside the lock.
        let password_hash = hash_password(&new_user.password)?;

        // Step 2: uniqueness check and insert under one write lock.
        let mut users = self.users.write();
        if Self::email_taken(&users, &email) {
            return Err(StoreError::duplicate_email(email));
        }

        let user = User {
            id: Uuid::now_v7(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email,
            password_hash,
            password_changed_at: None,
            active: true,
            role: new_user.role,
            created_at: Utc::now(),
        };

        users.insert(user.id, user.clone());
        debug!(user_id = %user.id, email = %user.email, "Created user");

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read();
        Ok(users.get(&id).filter(|u| u.active).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let email = email.trim().to_lowercase();
        let users = self.users.read();
        Ok(users
            .values()
            .find(|u| u.active && u.email == email)
            .cloned())
    }

    async fn update_password(&self, id: Uuid, new_password: &str) -> Result<User, StoreError> {
        // Step 1: hash outside the lock.
        let password_hash = hash_password(new_password)?;

        // Step 2: stamp and persist.
        let mut users = self.users.write();
        let user = users
            .get_mut(&id)
            .filter(|u| u.active)
            .ok_or(StoreError::not_found(id))?;

        user.password_hash = password_hash;
        // Back-dated by one second so the token minted right after the
        // change is judged fresh while earlier tokens become stale.
        user.password_changed_at = Some(Utc::now() - Duration::seconds(1));

        debug!(user_id = %user.id, "Updated password");
        Ok(user.clone())
    }

    async fn deactivate(&self, id: Uuid) -> Result<(), StoreError> {
        let mut users = self.users.write();
        let user = users
            .get_mut(&id)
            .filter(|u| u.active)
            .ok_or(StoreError::not_found(id))?;

        user.active = false;
        debug!(user_id = %user.id, "Deactivated user");
        Ok(())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let users = self.users.read();
        Ok(users.values().filter(|u| u.active).count())
    }
}

// =============================================================================
// Tests
// =============================================================================
