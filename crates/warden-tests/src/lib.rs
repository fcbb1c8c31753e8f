// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # warden-tests
//!
//! Integration test harness for the warden auth service. The tests in
//! `tests/` drive the full router — middleware stack included — against the
//! in-memory identity store.

pub mod common;
