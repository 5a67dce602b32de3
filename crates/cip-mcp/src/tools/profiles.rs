//! Profile listing tool - Discover registered domain profiles

use cip_domain::ProfileDescriptor;
use cip_registry::ProfileRegistry;
use serde::Serialize;

/// Result of listing profiles
#[derive(Debug, Serialize)]
pub struct ListProfilesResult {
    /// Always `ok`
    pub status: &'static str,
    /// Number of profiles
    pub count: usize,
    /// Descriptors sorted by domain name
    pub profiles: Vec<ProfileDescriptor>,
}

/// Handle list_domain_profiles tool invocation
pub fn handle_list_profiles(registry: &ProfileRegistry) -> ListProfilesResult {
    ListProfilesResult {
        status: "ok",
        count: registry.len(),
        profiles: registry.list(),
    }
}
