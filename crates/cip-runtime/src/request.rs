//! Detection request

use cip_domain::InteractionOverride;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

fn default_f_time() -> f64 {
    1.0
}

fn default_interaction_mode() -> String {
    "dynamic".to_string()
}

fn default_interaction_override_mode() -> String {
    "scale".to_string()
}

/// Caller inputs for one detection run
///
/// Modes and layer values arrive untyped, as a tool or SDK caller sends them,
/// and are checked by [`crate::run_detection`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectionRequest {
    /// Raw layer values, one per profile layer
    pub layer_values: Vec<Value>,

    /// `friction` or `emergence`
    pub mode: String,

    /// Temporal multiplier
    #[serde(default = "default_f_time")]
    pub f_time: f64,

    /// Threshold overrides forwarded to the detector
    #[serde(default)]
    pub threshold_override: Option<BTreeMap<String, f64>>,

    /// Temporal kernel configuration; `kernel_type` is checked against the allowlist
    #[serde(default)]
    pub temporal_config: Option<Map<String, Value>>,

    /// `dynamic` or `base`
    #[serde(default = "default_interaction_mode")]
    pub interaction_mode: String,

    /// Interaction coefficient override
    #[serde(default)]
    pub interaction_override: Option<InteractionOverride>,

    /// `scale` or `replace`
    #[serde(default = "default_interaction_override_mode")]
    pub interaction_override_mode: String,
}

impl DetectionRequest {
    /// Create a request with default options
    pub fn new<V: Into<Value>>(
        layer_values: impl IntoIterator<Item = V>,
        mode: impl Into<String>,
    ) -> Self {
        Self {
            layer_values: layer_values.into_iter().map(Into::into).collect(),
            mode: mode.into(),
            f_time: default_f_time(),
            threshold_override: None,
            temporal_config: None,
            interaction_mode: default_interaction_mode(),
            interaction_override: None,
            interaction_override_mode: default_interaction_override_mode(),
        }
    }

    /// Replace the layer values, keeping every other option
    pub fn with_layer_values<V: Into<Value>>(mut self, layer_values: impl IntoIterator<Item = V>) -> Self {
        self.layer_values = layer_values.into_iter().map(Into::into).collect();
        self
    }

    /// Set the temporal multiplier
    pub fn with_f_time(mut self, f_time: f64) -> Self {
        self.f_time = f_time;
        self
    }

    /// Set threshold overrides
    pub fn with_threshold_override(mut self, overrides: BTreeMap<String, f64>) -> Self {
        self.threshold_override = Some(overrides);
        self
    }

    /// Set the temporal kernel configuration
    pub fn with_temporal_config(mut self, config: Map<String, Value>) -> Self {
        self.temporal_config = Some(config);
        self
    }

    /// Set the interaction mode
    pub fn with_interaction_mode(mut self, mode: impl Into<String>) -> Self {
        self.interaction_mode = mode.into();
        self
    }

    /// Set the interaction override
    pub fn with_interaction_override(mut self, interaction_override: InteractionOverride) -> Self {
        self.interaction_override = Some(interaction_override);
        self
    }

    /// Set how the interaction override is applied
    pub fn with_interaction_override_mode(mut self, mode: impl Into<String>) -> Self {
        self.interaction_override_mode = mode.into();
        self
    }
}
