//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function for automatic configuration loading.

use tracing::info;

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{BackofficeError, Result};

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| BackofficeError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
pub async fn run_server() -> Result<()> {
    info!("Starting backoffice service");

    let config_path = "config/backoffice.yaml";
    info!("Loading configuration file: {}", config_path);

    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            info!("Configuration file loaded successfully");
            config
        }
        Err(e) => {
            info!(
                "Configuration file loading failed, using default config: {}",
                e
            );
            Config::default()
        }
    };

    let server = HttpServer::new(&config).await?;
    info!(
        "Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("API Endpoints:");
    info!("   GET    /health - Health check");
    info!("   GET    /api/menu - Authorized menu tree for the caller");
    info!("   GET    /api/access/check - Gate check for one node/action");
    info!("   GET    /api/catalog - Full catalog tree (most senior role)");
    info!("   POST   /api/catalog/nodes - Create catalog node");
    info!("   PUT    /api/catalog/nodes/{{id}} - Update catalog node");
    info!("   DELETE /api/catalog/nodes/{{id}} - Delete catalog node");
    info!("   POST   /api/users - Provision user");
    info!("   GET    /api/users/{{id}}/overrides - Explicit override rows");
    info!("   PUT    /api/users/{{id}}/overrides - Replace override set");

    server.start().await
}
