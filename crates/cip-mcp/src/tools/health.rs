//! Health tool - Report readiness and profile load state

use cip_registry::ProfileRegistry;
use serde::Serialize;

/// Human-readable server name
pub const SERVER_NAME: &str = "CIP Mantic Core";

/// Result of a health check
#[derive(Debug, Serialize)]
pub struct HealthResult {
    /// Always `ok`
    pub status: &'static str,
    /// Server name
    pub server: &'static str,
    /// Server version
    pub version: &'static str,
    /// Number of registered profiles
    pub profiles_loaded: usize,
}

/// Handle health_check tool invocation
pub fn handle_health(registry: &ProfileRegistry) -> HealthResult {
    HealthResult {
        status: "ok",
        server: SERVER_NAME,
        version: env!("CARGO_PKG_VERSION"),
        profiles_loaded: registry.len(),
    }
}
