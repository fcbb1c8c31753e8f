// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration loading.
//!
//! Configuration comes from a TOML file; the JWT secret may instead be
//! supplied through the `WARDEN_JWT_SECRET` environment variable, which
//! takes precedence so the secret never has to live on disk.

use std::path::Path;

use warden_api::ApiConfig;

use crate::error::CliError;

/// Environment variable carrying the JWT signing secret.
pub const JWT_SECRET_ENV: &str = "WARDEN_JWT_SECRET";

/// Loads configuration from the given file, applying environment overrides.
///
/// A missing file is not an error: defaults are used so that `warden run
/// --dev-mode` works with no setup at all.
pub fn load_config(path: &Path) -> Result<ApiConfig, CliError> {
    let mut config = if path.exists() {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CliError::config_read(path, e.to_string()))?;

        toml::from_str(&raw).map_err(|e| CliError::config_parse(path, e.to_string()))?
    } else {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        ApiConfig::default()
    };

    if let Ok(secret) = std::env::var(JWT_SECRET_ENV) {
        config.jwt.secret = secret;
    }

    Ok(config)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config(Path::new("/nonexistent/warden.toml")).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
port = 9999
environment = "production"

[jwt]
secret = "configured-secret-that-is-long-enough-to-use"
ttl_secs = 600
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.port, 9999);
        assert!(config.environment.is_production());
        assert_eq!(config.jwt.ttl_secs, 600);
        assert_eq!(
            config.jwt.secret,
            "configured-secret-that-is-long-enough-to-use"
        );
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, CliError::ConfigParse { .. }));
    }
}
