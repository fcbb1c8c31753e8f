// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Application state shared across handlers.

use std::sync::Arc;

use warden_core::{MemoryUserStore, UserStore};

use crate::auth::JwtManager;
use crate::config::ApiConfig;
use crate::error::ApiResult;

// =============================================================================
// AppState
// =============================================================================

/// Application state shared across all handlers.
///
/// Everything here is immutable after startup or owns its own interior
/// synchronization; requests never coordinate through this type.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Token codec.
    pub jwt_manager: Arc<JwtManager>,
    /// Identity store.
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    /// Creates a new app state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Returns the token codec.
    pub fn jwt(&self) -> &JwtManager {
        &self.jwt_manager
    }

    /// Returns the identity store.
    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }
}

// =============================================================================
// AppStateBuilder
// =============================================================================

/// Builder for constructing [`AppState`].
#[derive(Default)]
pub struct AppStateBuilder {
    config: Option<ApiConfig>,
    jwt_manager: Option<Arc<JwtManager>>,
    store: Option<Arc<dyn UserStore>>,
}

impl AppStateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the token codec.
    pub fn jwt_manager(mut self, manager: Arc<JwtManager>) -> Self {
        self.jwt_manager = Some(manager);
        self
    }

    /// Sets the identity store.
    pub fn store(mut self, store: Arc<dyn UserStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the state.
    ///
    /// The token codec is constructed from the configuration when not
    /// supplied; the store defaults to the in-memory implementation.
    pub fn build(self) -> ApiResult<AppState> {
        let config = self.config.unwrap_or_default();

        let jwt_manager = match self.jwt_manager {
            Some(manager) => manager,
            None => Arc::new(JwtManager::new(config.jwt.clone())?),
        };

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryUserStore::new()));

        Ok(AppState {
            config: Arc::new(config),
            jwt_manager,
            store,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;

    fn test_config() -> ApiConfig {
        ApiConfig::default().with_jwt(JwtConfig::new(
            "test-secret-key-that-is-long-enough-for-testing",
        ))
    }

    #[test]
    fn test_builder_defaults() {
        let state = AppState::builder().config(test_config()).build().unwrap();
        assert_eq!(state.jwt().ttl_secs(), 3600);
    }

    #[test]
    fn test_builder_rejects_missing_secret() {
        let result = AppState::builder().build();
        assert!(result.is_err());
    }
}
