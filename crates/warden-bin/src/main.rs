// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! warden — authentication and role-based access control service.
//!
//! Binary entry point.

use warden_bin::cli::{Cli, Commands};
use warden_bin::{commands, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    logging::init_logging(cli.effective_log_level(), cli.log_format);

    let result = match cli.effective_command() {
        Commands::Run(args) => commands::run(&cli.config, args).await,
        Commands::Validate => commands::validate(&cli.config),
        Commands::GenKey(args) => {
            println!("{}", commands::gen_key(args.bytes));
            Ok(())
        }
        Commands::Version => {
            commands::version();
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "warden exited with an error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
