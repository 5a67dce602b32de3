//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the core and its collaborators.
//! The detector is the external scoring computation; translators map
//! arbitrary domain context onto positional layer values.

use crate::{DetectionMode, HierarchyLevel, InteractionMode, InteractionOverrideMode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Caller-supplied interaction override, keyed by layer or positional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InteractionOverride {
    /// Coefficients keyed by layer name
    ByLayer(BTreeMap<String, f64>),
    /// Coefficients aligned with the profile's layer order
    Positional(Vec<f64>),
}

/// Parameters passed to the external detector
///
/// Field names are the detector's call contract and serialize unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectorParams {
    /// Profile domain name
    pub domain_name: String,
    /// Ordered layer names
    pub layer_names: Vec<String>,
    /// Weights aligned with `layer_names`
    pub weights: Vec<f64>,
    /// Layer values, already clamped to [0, 1]
    pub layer_values: Vec<f64>,
    /// Detection mode
    pub mode: DetectionMode,
    /// Temporal multiplier
    pub f_time: f64,
    /// Threshold overrides requested by the caller
    pub threshold_override: Option<BTreeMap<String, f64>>,
    /// Temporal kernel configuration requested by the caller
    pub temporal_config: Option<Map<String, Value>>,
    /// Interaction coefficient mode
    pub interaction_mode: InteractionMode,
    /// Interaction coefficient override
    pub interaction_override: Option<InteractionOverride>,
    /// How the interaction override is applied
    pub interaction_override_mode: InteractionOverrideMode,
    /// Hierarchy level per layer
    pub layer_hierarchy: BTreeMap<String, HierarchyLevel>,
    /// Profile detection threshold
    pub detection_threshold: f64,
}

/// Errors surfaced by a detector implementation
#[derive(Error, Debug)]
pub enum DetectorError {
    /// The detector could not be loaded or reached
    #[error("detector unavailable: {0}")]
    Unavailable(String),

    /// The detector raised during execution; its error is kept as-is
    #[error(transparent)]
    Failed(Box<dyn std::error::Error + Send + Sync>),
}

impl DetectorError {
    /// Wrap a detector-internal failure without altering its message
    pub fn failed<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        DetectorError::Failed(error.into())
    }
}

/// Trait for the external detection computation
///
/// Implemented outside the core (HTTP client, test doubles). Implementations
/// return the raw result mapping, which is expected to carry an
/// `overrides_applied` block.
pub trait Detector: Send + Sync {
    /// Run one detection
    fn detect(&self, params: &DetectorParams) -> Result<Map<String, Value>, DetectorError>;
}

/// Normalized translator output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslationResult {
    /// Ordered layer values
    pub layer_values: Vec<f64>,

    /// Translator-specific details
    #[serde(default)]
    pub details: Map<String, Value>,
}

/// Trait for mapping raw domain context onto positional layer values
///
/// Implemented by downstream domain adapters.
pub trait DomainTranslator {
    /// Error type for translation
    type Error: std::error::Error + Send + Sync + 'static;

    /// Translate raw context into ordered layer values
    fn translate(&self, raw_context: &Map<String, Value>) -> Result<TranslationResult, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_interaction_override_untagged() {
        let by_layer: InteractionOverride = serde_json::from_value(json!({"risk": 1.5})).unwrap();
        assert!(matches!(by_layer, InteractionOverride::ByLayer(_)));

        let positional: InteractionOverride = serde_json::from_value(json!([1.0, 0.5])).unwrap();
        assert_eq!(positional, InteractionOverride::Positional(vec![1.0, 0.5]));
    }

    #[test]
    fn test_failed_keeps_message() {
        let err = DetectorError::failed("detect exploded");
        assert_eq!(err.to_string(), "detect exploded");
    }

    #[test]
    fn test_translation_result_details_default() {
        let result: TranslationResult =
            serde_json::from_value(json!({"layer_values": [0.1, 0.2, 0.3]})).unwrap();
        assert!(result.details.is_empty());
    }
}
