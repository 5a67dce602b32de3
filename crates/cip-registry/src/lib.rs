//! CIP Profile Registry
//!
//! In-memory registry of validated domain profiles, keyed by domain name,
//! plus the directory loader that populates it from YAML documents.
//!
//! # Examples
//!
//! ```no_run
//! use cip_registry::ProfileRegistry;
//!
//! let registry = ProfileRegistry::from_directory("profiles").unwrap();
//! for descriptor in registry.list() {
//!     println!("{} v{}", descriptor.domain_name, descriptor.version);
//! }
//! ```

#![warn(missing_docs)]

mod error;
mod loader;
mod registry;

pub use error::RegistryError;
pub use loader::{load_profile_file, load_profiles_from_directory, profile_paths};
pub use registry::ProfileRegistry;
