//! Detector implementations
//!
//! - `HttpDetector`: posts parameters to a remote detection endpoint
//! - `MockDetector`: deterministic test double
//! - `UnconfiguredDetector`: stands in when no endpoint is configured

mod http;
mod mock;

pub use http::{HttpDetector, DEFAULT_TIMEOUT_SECS};
pub use mock::MockDetector;

use cip_domain::{Detector, DetectorError, DetectorParams};
use serde_json::{Map, Value};

/// Detector used when no detection endpoint is configured
///
/// Every call reports the detector as unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredDetector;

impl Detector for UnconfiguredDetector {
    fn detect(&self, _params: &DetectorParams) -> Result<Map<String, Value>, DetectorError> {
        Err(DetectorError::Unavailable(
            "no detector endpoint configured".to_string(),
        ))
    }
}
