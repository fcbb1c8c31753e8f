// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `version` subcommand.

/// Prints version information for all warden components.
pub fn version() {
    println!("warden      v{}", crate::VERSION);
    println!("warden-api  v{}", warden_api::VERSION);
    println!("warden-core v{}", warden_core::VERSION);
}
