// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Subcommand implementations.

mod gen_key;
mod run;
mod validate;
mod version;

pub use gen_key::gen_key;
pub use run::run;
pub use validate::validate;
pub use version::version;
