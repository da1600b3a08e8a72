//! Application state shared across HTTP handlers
//!
//! This module provides the AppState struct and its implementations.

use std::sync::Arc;

use crate::access::AccessEngine;
use crate::config::Config;
use crate::storage::StorageLayer;

/// HTTP server state shared across handlers
///
/// This struct contains shared resources that need to be accessed across
/// multiple request handlers. All fields are wrapped in Arc for efficient
/// sharing across threads.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Permission engine
    pub access: Arc<AccessEngine>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, access: AccessEngine, storage: Arc<StorageLayer>) -> Self {
        Self {
            config: Arc::new(config),
            access: Arc::new(access),
            storage,
        }
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
