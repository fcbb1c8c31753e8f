// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `run` subcommand: start the auth service.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use warden_api::ApiServerBuilder;
use warden_core::MemoryUserStore;

use crate::cli::RunArgs;
use crate::config_loader::load_config;
use crate::error::CliError;
use crate::shutdown::shutdown_signal;

/// Starts the server and blocks until shutdown.
pub async fn run(config_path: &Path, args: RunArgs) -> Result<(), CliError> {
    let mut config = load_config(config_path)?;

    if let Some(port) = args.port {
        config.port = port;
    }

    if config.jwt.secret.is_empty() {
        if args.dev_mode {
            // Ephemeral secret: every restart invalidates all tokens.
            config.jwt.secret = crate::commands::gen_key(64);
            warn!("Dev mode: using an ephemeral JWT secret");
        } else {
            return Err(CliError::config_invalid(
                "JWT secret is not configured; set jwt.secret or WARDEN_JWT_SECRET \
                 (or pass --dev-mode for an ephemeral one)",
            ));
        }
    }

    // The in-memory store backs development and testing; a production
    // deployment wires a persistent UserStore implementation here.
    let store = Arc::new(MemoryUserStore::new());

    let server = ApiServerBuilder::new()
        .config(config)
        .store(store)
        .build()?;

    info!(addr = %server.addr(), "warden starting");

    server.run_with_shutdown(shutdown_signal()).await?;

    Ok(())
}
