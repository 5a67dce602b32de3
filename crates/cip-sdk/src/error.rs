//! Error types for the CIP SDK.

use cip_registry::RegistryError;
use cip_runtime::DetectionError;
use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// Profile loading or lookup failed
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Detection failed
    #[error(transparent)]
    Detection(#[from] DetectionError),

    /// The domain translator failed
    #[error("Translator error: {0}")]
    Translator(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Settings are malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Settings file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for SdkError {
    fn from(e: toml::de::Error) -> Self {
        SdkError::Config(format!("Invalid settings file: {}", e))
    }
}
