//! CIP Detection Runtime
//!
//! Builds normalized detection envelopes around an external [`Detector`].
//!
//! The runtime owns everything except the scoring itself:
//! - Mode parsing and layer-value coercion, with clamping to [0, 1]
//! - Temporal kernel allowlist enforcement, before the detector is called
//! - Audit derivation from the detector's `overrides_applied` report
//! - The closed [`DetectionEnvelope`] response shape
//!
//! # Examples
//!
//! ```
//! use cip_runtime::{run_detection, DetectionRequest, MockDetector};
//! use serde_json::json;
//!
//! let profile = cip_gatekeeper::validate(&json!({
//!     "domain_name": "signal_core",
//!     "layer_names": ["alpha", "beta", "gamma"],
//!     "weights": [0.5, 0.3, 0.2],
//!     "hierarchy": {"alpha": "Micro", "beta": "Meso", "gamma": "Macro"}
//! })).unwrap();
//!
//! let envelope = run_detection(
//!     &MockDetector::echo(),
//!     &profile,
//!     DetectionRequest::new([1.4, 0.5, -0.1], "friction"),
//! ).unwrap();
//! assert_eq!(envelope.layer_values, vec![1.0, 0.5, 0.0]);
//! ```
//!
//! [`Detector`]: cip_domain::Detector

#![warn(missing_docs)]

mod audit;
mod detector;
mod envelope;
mod error;
mod request;
mod runtime;

pub use audit::{extract_clamped_fields, extract_rejected_fields, AuditSummary};
pub use detector::{HttpDetector, MockDetector, UnconfiguredDetector, DEFAULT_TIMEOUT_SECS};
pub use envelope::{DetectionEnvelope, EnvelopeStatus, CONTRACT_VERSION};
pub use error::DetectionError;
pub use request::DetectionRequest;
pub use runtime::{run_detection, CALIBRATION_SOURCE};
