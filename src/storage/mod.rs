//! Storage layer for the backoffice service
//!
//! This module provides data persistence for the menu catalog, permission
//! overrides, and user records.

/// Database storage module
pub mod database;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::StorageConfig;
use crate::utils::error::Result;

/// Main storage layer that owns the database backend
#[derive(Debug, Clone)]
pub struct StorageLayer {
    /// Database connection pool
    pub database: Arc<database::Database>,
}

impl StorageLayer {
    /// Create a new storage layer
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing storage layer");

        debug!("Connecting to database");
        let database = Arc::new(database::Database::new(&config.database).await?);

        info!("Storage layer initialized successfully");
        Ok(Self { database })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations");
        self.database.migrate().await?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Health check for the storage backend
    pub async fn health_check(&self) -> Result<StorageHealthStatus> {
        let mut status = StorageHealthStatus {
            database: false,
            overall: false,
        };

        match self.database.health_check().await {
            Ok(_) => status.database = true,
            Err(e) => {
                warn!("Database health check failed: {}", e);
            }
        }

        status.overall = status.database;
        Ok(status)
    }

    /// Get the database backend
    pub fn db(&self) -> &database::Database {
        &self.database
    }
}

/// Storage health status
#[derive(Debug, Clone, serde::Serialize)]
pub struct StorageHealthStatus {
    /// Database health status
    pub database: bool,
    /// Overall health status
    pub overall: bool,
}
