//! Registry error types

use cip_gatekeeper::ProfileDocumentError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the registry and the directory loader
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A profile with this domain name is already registered
    #[error("Profile '{0}' already registered")]
    Duplicate(String),

    /// No profile is registered under this name
    #[error("Unknown domain profile '{name}'. Available: {available:?}")]
    NotFound {
        /// Requested domain name
        name: String,
        /// Registered domain names, sorted
        available: Vec<String>,
    },

    /// A profile document failed to load
    #[error("{}: {source}", path.display())]
    Load {
        /// File that failed
        path: PathBuf,
        /// Read, parse or contract failure
        #[source]
        source: ProfileDocumentError,
    },

    /// The profile directory could not be walked
    #[error("Failed to read profile directory: {0}")]
    Walk(#[from] walkdir::Error),
}
