//! # Backoffice-RS
//!
//! Internal business-administration service built around a role-based menu
//! permission engine: each role carries a default {read, create, update,
//! delete} capability profile, administrators can override individual flags
//! per user and per menu node, and the navigable menu tree is pruned to what
//! each user may read.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use backoffice_rs::{Backoffice, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/backoffice.yaml").await?;
//!     let service = Backoffice::new(config).await?;
//!     service.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Library use
//!
//! The permission engine is usable without the HTTP surface: build a
//! [`access::RoleTable`], load the catalog and a user's overrides, and call
//! [`access::resolve`] for the effective capability map.

#![warn(clippy::all)]

// Public module exports
pub mod access;
pub mod config;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use access::{
    AccessEngine, Action, Capabilities, CapabilityOverride, MenuNode, MenuTreeNode, NodeRef, Role,
    RoleTable, resolve,
};
pub use config::Config;
pub use utils::error::{BackofficeError, Result};

use tracing::info;

/// A minimal backoffice service wrapper
pub struct Backoffice {
    config: Config,
    server: server::HttpServer,
}

impl Backoffice {
    /// Create a new service instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new backoffice instance");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run the service
    pub async fn run(self) -> Result<()> {
        info!("Starting backoffice service");
        info!("Configuration: {:#?}", self.config);

        self.server.start().await?;

        Ok(())
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
