//! Configuration management for the backoffice service
//!
//! This module handles loading, validation, and management of all service
//! configuration.

pub mod models;

pub use models::*;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::utils::error::{BackofficeError, Result};

/// Main configuration struct for the service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Access control configuration
    #[serde(default)]
    pub access: AccessConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| BackofficeError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| BackofficeError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        if let Ok(url) = std::env::var("BACKOFFICE_DATABASE_URL") {
            config.storage.database.url = url;
        }
        if let Ok(host) = std::env::var("BACKOFFICE_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("BACKOFFICE_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| BackofficeError::Config(format!("Invalid port: {}", port)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Get access control configuration
    pub fn access(&self) -> &AccessConfig {
        &self.access
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| BackofficeError::Config(format!("Server config error: {}", e)))?;

        self.server
            .cors
            .validate()
            .map_err(|e| BackofficeError::Config(format!("CORS config error: {}", e)))?;

        self.storage
            .database
            .validate()
            .map_err(|e| BackofficeError::Config(format!("Database config error: {}", e)))?;

        self.access
            .validate()
            .map_err(|e| BackofficeError::Config(format!("Access config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.storage = self.storage.merge(other.storage);
        self.access = self.access.merge(other.access);
        self
    }
}
