//! CIP MCP Server - Main entry point

use cip_mcp::McpServer;
use cip_sdk::Settings;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let settings = match Settings::load(None) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings: {}", e);
            std::process::exit(1);
        }
    };

    // Log to stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(&settings.log_level))
        .init();

    let server = match McpServer::from_settings(&settings) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Failed to start MCP server: {}", e);
            std::process::exit(1);
        }
    };

    info!("Serving profiles from {}", settings.profiles_dir.display());

    // Blocks until stdin closes
    if let Err(e) = server.run() {
        eprintln!("MCP server error: {}", e);
        std::process::exit(1);
    }
}
