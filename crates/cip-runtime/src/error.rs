//! Detection error types

use cip_domain::DetectorError;
use thiserror::Error;

/// Errors raised while building a detection envelope
#[derive(Error, Debug)]
pub enum DetectionError {
    /// A request argument is malformed (mode, layer values)
    #[error("{0}")]
    InvalidArgument(String),

    /// The requested temporal kernel is not on the profile's allowlist
    #[error("kernel_type '{kernel}' is not allowed for domain '{domain}'. Allowed: {allowed:?}")]
    PolicyViolation {
        /// Requested kernel
        kernel: String,
        /// Profile domain name
        domain: String,
        /// Kernels the profile allows
        allowed: Vec<String>,
    },

    /// The detector could not be loaded or reached
    #[error("detector unavailable: {0}")]
    Unavailable(String),

    /// The detector failed; its error is carried unchanged
    #[error(transparent)]
    Detector(DetectorError),
}

impl From<DetectorError> for DetectionError {
    fn from(e: DetectorError) -> Self {
        match e {
            DetectorError::Unavailable(reason) => DetectionError::Unavailable(reason),
            other => DetectionError::Detector(other),
        }
    }
}
