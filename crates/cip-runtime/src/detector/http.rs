//! HTTP detector client
//!
//! Posts [`DetectorParams`] as JSON to a remote detection endpoint and reads
//! the result mapping from the response body.
//!
//! # Examples
//!
//! ```no_run
//! use cip_runtime::HttpDetector;
//! use std::time::Duration;
//!
//! let detector = HttpDetector::new("http://localhost:8020/detect", Duration::from_secs(30)).unwrap();
//! ```

use cip_domain::{Detector, DetectorError, DetectorParams};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

/// Default request timeout (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Detector reached over HTTP
///
/// Connection failures and timeouts report the detector as unavailable; a
/// non-success status is a detector failure carrying the response body.
#[derive(Debug, Clone)]
pub struct HttpDetector {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpDetector {
    /// Create a client for `endpoint` with a request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// Endpoint this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Detector for HttpDetector {
    fn detect(&self, params: &DetectorParams) -> Result<Map<String, Value>, DetectorError> {
        debug!("Posting detection for '{}' to {}", params.domain_name, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(params)
            .send()
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    DetectorError::Unavailable(format!("{}: {}", self.endpoint, e))
                } else {
                    DetectorError::failed(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DetectorError::failed(format!("HTTP {}: {}", status, body)));
        }

        match response.json::<Value>().map_err(DetectorError::failed)? {
            Value::Object(result) => Ok(result),
            other => Err(DetectorError::failed(format!(
                "detector returned a non-object result: {}",
                other
            ))),
        }
    }
}
