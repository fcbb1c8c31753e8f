// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Password hashing primitives.
//!
//! Hashing and verification are plain functions so that the store's
//! create/update operations can call them as explicit, testable steps —
//! there is no hidden lifecycle hook that hashes on save.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::StoreError;

/// Hashes a plaintext password with Argon2id and a fresh random salt.
///
/// The output is a self-describing PHC string (`$argon2id$...`) carrying
/// the salt and parameters, suitable for direct storage.
pub fn hash_password(password: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::hash(e.to_string()))
}

/// Verifies a candidate password against a stored PHC hash string.
///
/// Returns `false` both for a wrong password and for an unparseable hash;
/// the caller cannot distinguish the two, which is exactly the behavior the
/// login path needs.
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

// =============================================================================
// Tests
// =============================================================================
