// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication context.

use uuid::Uuid;

use warden_core::{Role, User};

use super::Claims;

/// The authenticated context attached to a request.
///
/// Built by the authentication middleware only after the full verification
/// chain succeeds: token present, signature valid, not expired, identity
/// still resolvable from the store, and issued after the last password
/// change. A token alone never produces one of these — `user` is always the
/// live store record, not a claim snapshot.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The re-resolved identity.
    pub user: User,
    /// The verified token claims the request presented.
    pub claims: Claims,
}

impl AuthContext {
    /// Creates a context from a resolved identity and its verified claims.
    pub fn new(user: User, claims: Claims) -> Self {
        Self { user, claims }
    }

    /// Returns the identity id.
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    /// Returns the identity's current role (from the store, not the token).
    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Returns `true` if the identity's current role is in the allow-list.
    pub fn is_allowed(&self, allowed: &[Role]) -> bool {
        allowed.contains(&self.user.role)
    }
}

// =============================================================================
// Tests
// =============================================================================
