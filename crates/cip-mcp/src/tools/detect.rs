//! Detect tools - Run profile-based detection
//!
//! Backs `mantic_detect`, `mantic_detect_friction` and
//! `mantic_detect_emergence`. Failures come back as a structured error
//! payload rather than a JSON-RPC error.

use cip_domain::Detector;
use cip_registry::{ProfileRegistry, RegistryError};
use cip_runtime::{DetectionEnvelope, DetectionError, DetectionRequest};
use cip_sdk::{safe_detect, SdkError};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Parameters for a detection tool call
#[derive(Debug, Deserialize)]
pub struct DetectParams {
    /// Registered domain profile to detect under
    pub profile_name: String,
    /// Layer values, mode and optional overrides
    #[serde(flatten)]
    pub request: DetectionRequest,
}

/// Error category reported to tool callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// No profile registered under the requested name
    UnknownProfile,
    /// Arguments failed checks or broke profile policy
    ValidationError,
    /// Detector unavailable or failed
    RuntimeError,
}

/// Error detail inside a [`ToolError`]
#[derive(Debug, Serialize)]
pub struct ToolErrorDetail {
    /// Error category
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
}

/// Structured tool failure, `{status: "error", error: {code, message}}`
#[derive(Debug, Serialize)]
pub struct ToolError {
    /// Always `error`
    pub status: &'static str,
    /// Failure detail
    pub error: ToolErrorDetail,
}

impl ToolError {
    /// Create a tool error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: "error",
            error: ToolErrorDetail {
                code,
                message: message.into(),
            },
        }
    }
}

/// Either an envelope or a structured error
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DetectOutcome {
    /// Detection succeeded
    Envelope(Box<DetectionEnvelope>),
    /// Detection failed
    Error(ToolError),
}

impl From<SdkError> for ToolError {
    fn from(e: SdkError) -> Self {
        match e {
            SdkError::Registry(e @ RegistryError::NotFound { .. }) => {
                ToolError::new(ErrorCode::UnknownProfile, e.to_string())
            }
            SdkError::Detection(
                e @ (DetectionError::InvalidArgument(_) | DetectionError::PolicyViolation { .. }),
            ) => ToolError::new(ErrorCode::ValidationError, e.to_string()),
            other => {
                error!("mantic_detect failed: {}", other);
                ToolError::new(ErrorCode::RuntimeError, other.to_string())
            }
        }
    }
}

/// Handle a detection tool invocation
pub fn handle_detect(
    registry: &ProfileRegistry,
    detector: &dyn Detector,
    params: DetectParams,
) -> DetectOutcome {
    match safe_detect(detector, registry, &params.profile_name, params.request) {
        Ok(envelope) => DetectOutcome::Envelope(Box::new(envelope)),
        Err(e) => DetectOutcome::Error(e.into()),
    }
}
