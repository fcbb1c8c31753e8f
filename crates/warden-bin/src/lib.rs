// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # warden-bin
//!
//! Command-line entry point for the warden auth service.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config_loader;
pub mod error;
pub mod logging;
pub mod shutdown;

pub use error::CliError;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
