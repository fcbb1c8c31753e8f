// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `validate` subcommand: check the configuration file.

use std::path::Path;

use crate::config_loader::load_config;
use crate::error::CliError;

/// Loads and validates the configuration, printing a summary.
pub fn validate(config_path: &Path) -> Result<(), CliError> {
    let config = load_config(config_path)?;

    config
        .validate()
        .map_err(|e| CliError::config_invalid(e.to_string()))?;

    println!("Configuration OK");
    println!("  listen      {}", config.socket_addr());
    println!("  environment {:?}", config.environment);
    println!("  token ttl   {}s", config.jwt.ttl_secs);

    Ok(())
}
