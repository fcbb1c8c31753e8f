// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Identity records and roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Role
// =============================================================================

/// Access roles.
///
/// Roles form a closed set with no ordering or hierarchy: authorization is
/// always a membership test against an explicit per-route allow-list, never
/// a rank comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Elevated administrative access.
    Admin,
    /// Standard access. The default for newly registered identities.
    Supervisor,
}

impl Role {
    /// Returns the role name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Supervisor => "supervisor",
        }
    }

    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" | "administrator" => Some(Role::Admin),
            "supervisor" => Some(Role::Supervisor),
            _ => None,
        }
    }

    /// Returns all roles.
    pub fn all() -> &'static [Role] {
        &[Role::Admin, Role::Supervisor]
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Supervisor
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered identity.
///
/// This type is intentionally **not** serializable: `password_hash` must
/// never cross a serialization boundary. The HTTP layer exposes its own
/// password-free representation built from this record.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique identifier.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique, lowercase-normalized email address.
    pub email: String,
    /// Argon2id password hash. Only the login path may inspect this.
    pub password_hash: String,
    /// When the password was last changed. `None` until the first change.
    pub password_changed_at: Option<DateTime<Utc>>,
    /// Soft-delete flag. Inactive identities are invisible to every store
    /// read used by the request gates.
    pub active: bool,
    /// Access role.
    pub role: Role,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns `true` if the password was changed at or after the given
    /// token issue time (Unix seconds).
    ///
    /// A token is only trustworthy if it was issued strictly after the most
    /// recent password change; an equal-second change counts as stale.
    pub fn changed_password_after(&self, token_iat: i64) -> bool {
        match self.password_changed_at {
            Some(changed_at) => changed_at.timestamp() >= token_iat,
            // Never changed: every token issued after registration is fine.
            None => false,
        }
    }

    /// Returns the user's full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// NewUser
// =============================================================================

/// Input for creating an identity.
///
/// Carries the plaintext password exactly as long as it takes the store to
/// hash it; the confirmation field never reaches this type — equality is
/// checked at the request boundary and then discarded.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address. Normalized to lowercase by the store.
    pub email: String,
    /// Plaintext password, hashed by the store before persistence.
    pub password: String,
    /// Access role. Defaults to [`Role::Supervisor`].
    pub role: Role,
}

impl NewUser {
    /// Creates a new-user request with the default role.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: password.into(),
            role: Role::default(),
        }
    }

    /// Sets the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_user() -> User {
        User {
            id: Uuid::now_v7(),
            first_name: "jane".to_string(),
            last_name: "smith".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            password_changed_at: None,
            active: true,
            role: Role::default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("supervisor"), Some(Role::Supervisor));
        assert_eq!(Role::parse("root"), None);
    }

    #[test]
    fn test_role_default_is_least_privileged() {
        assert_eq!(Role::default(), Role::Supervisor);
    }

    #[test]
    fn test_changed_password_after_never_changed() {
        let user = sample_user();
        assert!(!user.changed_password_after(Utc::now().timestamp()));
    }

    #[test]
    fn test_changed_password_after_older_token_is_stale() {
        let mut user = sample_user();
        let changed = Utc::now();
        user.password_changed_at = Some(changed);

        // Issued before the change: stale.
        let old_iat = (changed - Duration::seconds(60)).timestamp();
        assert!(user.changed_password_after(old_iat));

        // Issued in the same second as the change: still stale.
        assert!(user.changed_password_after(changed.timestamp()));

        // Issued after the change: fresh.
        let new_iat = (changed + Duration::seconds(2)).timestamp();
        assert!(!user.changed_password_after(new_iat));
    }

    #[test]
    fn test_new_user_defaults() {
        let new_user = NewUser::new("jane", "smith", "jane@example.com", "password");
        assert_eq!(new_user.role, Role::Supervisor);

        let admin = NewUser::new("root", "user", "root@example.com", "password")
            .with_role(Role::Admin);
        assert_eq!(admin.role, Role::Admin);
    }
}
