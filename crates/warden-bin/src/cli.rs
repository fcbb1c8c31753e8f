// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! Subcommands:
//!
//! - `run`: Start the auth service (default)
//! - `validate`: Validate the configuration file
//! - `gen-key`: Generate a JWT signing secret
//! - `version`: Show version information

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// warden — authentication and role-based access control service.
#[derive(Parser, Debug)]
#[command(
    name = "warden",
    author = "Sylvex <contact@sylvex.io>",
    version = crate::VERSION,
    about = "Token-based authentication service with role-gated routes",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "warden.toml",
        env = "WARDEN_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        default_value = "info",
        env = "WARDEN_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json, compact)
    #[arg(long, default_value = "text", env = "WARDEN_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Enable quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands for the warden CLI.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the auth service
    ///
    /// This is the default command when no subcommand is specified.
    Run(RunArgs),

    /// Validate the configuration file
    ///
    /// Parses and validates the configuration without starting the server.
    Validate,

    /// Generate a JWT signing secret
    ///
    /// Produces a cryptographically random secret suitable for the
    /// `jwt.secret` configuration value or the WARDEN_JWT_SECRET variable.
    #[command(name = "gen-key")]
    GenKey(GenKeyArgs),

    /// Show detailed version information
    Version,
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `run` command.
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Override the configured port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Development mode: generate an ephemeral JWT secret when none is
    /// configured (tokens do not survive restarts)
    #[arg(long, env = "WARDEN_DEV_MODE")]
    pub dev_mode: bool,
}

/// Arguments for the `gen-key` command.
#[derive(Args, Debug, Clone)]
pub struct GenKeyArgs {
    /// Secret length in bytes before encoding
    #[arg(short = 'n', long, default_value = "48")]
    pub bytes: usize,
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
    /// Compact format for minimal output
    Compact,
}

// =============================================================================
// Helper Methods
// =============================================================================

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective command, defaulting to `Run` if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Run(RunArgs::default()))
    }

    /// Get the effective log level based on flags.
    pub fn effective_log_level(&self) -> &str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            &self.log_level
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::parse_from(["warden"]);
        assert!(cli.command.is_none());
        assert!(matches!(cli.effective_command(), Commands::Run(_)));
    }

    #[test]
    fn test_run_command_with_port() {
        let cli = Cli::parse_from(["warden", "run", "-p", "9000"]);
        if let Some(Commands::Run(args)) = cli.command {
            assert_eq!(args.port, Some(9000));
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_validate_command() {
        let cli = Cli::parse_from(["warden", "validate"]);
        assert!(matches!(cli.command, Some(Commands::Validate)));
    }

    #[test]
    fn test_gen_key_command() {
        let cli = Cli::parse_from(["warden", "gen-key", "-n", "64"]);
        if let Some(Commands::GenKey(args)) = cli.command {
            assert_eq!(args.bytes, 64);
        } else {
            panic!("Expected GenKey command");
        }
    }

    #[test]
    fn test_config_path() {
        let cli = Cli::parse_from(["warden", "-c", "/etc/warden/config.toml"]);
        assert_eq!(cli.config, PathBuf::from("/etc/warden/config.toml"));
    }

    #[test]
    fn test_quiet_and_verbose_levels() {
        let cli = Cli::parse_from(["warden", "-q"]);
        assert_eq!(cli.effective_log_level(), "warn");

        let cli = Cli::parse_from(["warden", "-v"]);
        assert_eq!(cli.effective_log_level(), "debug");

        let cli = Cli::parse_from(["warden", "-l", "trace"]);
        assert_eq!(cli.effective_log_level(), "trace");
    }
}
