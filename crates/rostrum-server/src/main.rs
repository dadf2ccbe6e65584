//! Standalone entry point for the Rostrum debate API.
//!
//! A thin wrapper around `rostrum-api` so the library crate stays
//! runnable-binary-free.

use anyhow::Result;
use rostrum_api::{RostrumServer, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    rostrum_api::init_tracing();

    tracing::info!("Starting Rostrum debate server...");

    // Hosted platforms only set a generic PORT; honour it when the
    // dedicated variable is absent.
    if let Ok(port) = std::env::var("PORT") {
        if std::env::var("ROSTRUM_PORT").is_err() {
            std::env::set_var("ROSTRUM_PORT", port);
        }
    }

    let config = ServerConfig::from_env();

    let server = RostrumServer::new(config).await.inspect_err(|e| {
        tracing::error!("Failed to initialize server: {}", e);
    })?;

    server.run().await.inspect_err(|e| {
        tracing::error!("Server error during execution: {}", e);
    })?;

    Ok(())
}
