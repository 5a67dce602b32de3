//! Profile registry

use crate::error::RegistryError;
use crate::loader::load_profiles_from_directory;
use cip_domain::ProfileDescriptor;
use cip_gatekeeper::DomainProfile;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Validated profiles keyed by domain name
///
/// Registration is exclusive: a second profile with the same domain name is
/// rejected and the first stays in place. Read-only once built, so a shared
/// reference can be handed to any number of threads.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, DomainProfile>,
}

impl ProfileRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from already-validated profiles
    pub fn with_profiles(
        profiles: impl IntoIterator<Item = DomainProfile>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for profile in profiles {
            registry.register(profile)?;
        }
        Ok(registry)
    }

    /// Load every profile document under `directory`
    ///
    /// A directory that does not exist yields an empty registry. Any document
    /// that fails validation aborts the load.
    pub fn from_directory(directory: impl AsRef<Path>) -> Result<Self, RegistryError> {
        Self::with_profiles(load_profiles_from_directory(directory)?)
    }

    /// Register a profile under its domain name
    pub fn register(&mut self, profile: DomainProfile) -> Result<(), RegistryError> {
        let name = profile.domain_name().to_string();
        if self.profiles.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        debug!("Registered profile '{}' v{}", name, profile.version());
        self.profiles.insert(name, profile);
        Ok(())
    }

    /// Look up a profile by domain name
    pub fn get(&self, domain_name: &str) -> Result<&DomainProfile, RegistryError> {
        self.profiles
            .get(domain_name)
            .ok_or_else(|| RegistryError::NotFound {
                name: domain_name.to_string(),
                available: self.names().into_iter().map(str::to_string).collect(),
            })
    }

    /// Descriptors of every profile, sorted by domain name
    pub fn list(&self) -> Vec<ProfileDescriptor> {
        self.profiles.values().map(DomainProfile::descriptor).collect()
    }

    /// Registered domain names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }

    /// Number of registered profiles
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether no profiles are registered
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
