//! Backoffice-RS - internal business-administration service
//!
//! Serves the role-based menu permission API.

use std::process::ExitCode;

use backoffice_rs::server;
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging system
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    // Start server (auto-loads config/backoffice.yaml)
    match server::builder::run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
