// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `gen-key` subcommand: generate a JWT signing secret.

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::RngCore;

/// Generates a random base64-encoded secret from `bytes` random bytes.
pub fn gen_key(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::rngs::OsRng.fill_bytes(&mut buf);
    STANDARD.encode(buf)
}

// =============================================================================
// Tests
// =============================================================================
