// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # warden-core
//!
//! Identity domain for the warden authentication service.
//!
//! This crate provides the foundational types used across all warden
//! components:
//!
//! - **User**: The identity record and its closed role enumeration
//! - **Password**: Explicit hashing and verification primitives
//! - **Store**: The `UserStore` trait and the in-memory reference
//!   implementation backing tests and the development server
//! - **Error**: Typed store failures
//!
//! ## Example
//!
//! ```rust,ignore
//! use warden_core::{MemoryUserStore, NewUser, Role, UserStore};
//!
//! let store = MemoryUserStore::new();
//! let user = store
//!     .create(NewUser::new("jane", "smith", "jane@example.com", "password"))
//!     .await?;
//! assert_eq!(user.role, Role::Supervisor);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod password;
pub mod store;
pub mod user;

pub use error::StoreError;
pub use password::{hash_password, verify_password};
pub use store::{MemoryUserStore, UserStore};
pub use user::{NewUser, Role, User};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
