// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI error type.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the warden binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be read.
    #[error("Failed to read config file '{path}': {message}")]
    ConfigRead {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying error description.
        message: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse config file '{path}': {message}")]
    ConfigParse {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying error description.
        message: String,
    },

    /// Configuration is structurally valid but unusable.
    #[error("Invalid configuration: {message}")]
    ConfigInvalid {
        /// What is wrong with it.
        message: String,
    },

    /// The API server failed.
    #[error("Server error: {0}")]
    Server(#[from] warden_api::ApiError),
}

impl CliError {
    /// Creates a config-read error.
    pub fn config_read(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigRead {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a config-parse error.
    pub fn config_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid-config error.
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }
}
