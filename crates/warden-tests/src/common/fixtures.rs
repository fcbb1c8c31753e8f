// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Canned request payloads.

use serde_json::{json, Value};

/// A complete, valid signup payload for the given email.
pub fn signup_payload(email: &str) -> Value {
    json!({
        "firstName": "jane",
        "lastName": "smith",
        "email": email,
        "password": "password",
        "passwordConfirm": "password",
    })
}

/// A signup payload requesting the admin role.
pub fn admin_signup_payload(email: &str) -> Value {
    let mut payload = signup_payload(email);
    payload["role"] = json!("admin");
    payload
}
