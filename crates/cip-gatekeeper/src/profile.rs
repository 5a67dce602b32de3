//! Canonical domain profile value

use cip_domain::{
    HierarchyLevel, InteractionMode, InteractionOverrideMode, KernelType, ProfileDescriptor,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Threshold key every profile must define
pub(crate) const DETECTION_THRESHOLD_KEY: &str = "detection";

/// Policy for interaction-coefficient control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionRules {
    pub(crate) default_mode: InteractionMode,
    pub(crate) default_override_mode: InteractionOverrideMode,
    pub(crate) min_value: f64,
    pub(crate) max_value: f64,
}

impl InteractionRules {
    /// Interaction mode used when the caller does not choose one
    pub fn default_mode(&self) -> InteractionMode {
        self.default_mode
    }

    /// Override mode used when the caller does not choose one
    pub fn default_override_mode(&self) -> InteractionOverrideMode {
        self.default_override_mode
    }

    /// Smallest coefficient a caller may request (>= 0.1)
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// Largest coefficient a caller may request (<= 2.0)
    pub fn max_value(&self) -> f64 {
        self.max_value
    }
}

impl Default for InteractionRules {
    fn default() -> Self {
        Self {
            default_mode: InteractionMode::Dynamic,
            default_override_mode: InteractionOverrideMode::Scale,
            min_value: cip_domain::constants::INTERACTION_MIN_FLOOR,
            max_value: cip_domain::constants::INTERACTION_MAX_CEILING,
        }
    }
}

/// Policy guardrails for downstream interpretive layers
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Guardrails {
    pub(crate) disclaimers: Vec<String>,
    pub(crate) prohibited_actions: Vec<String>,
    pub(crate) escalation_triggers: Vec<String>,
}

impl Guardrails {
    /// Disclaimers to attach to interpretations
    pub fn disclaimers(&self) -> &[String] {
        &self.disclaimers
    }

    /// Actions downstream layers must not take
    pub fn prohibited_actions(&self) -> &[String] {
        &self.prohibited_actions
    }

    /// Conditions that call for human escalation
    pub fn escalation_triggers(&self) -> &[String] {
        &self.escalation_triggers
    }
}

/// A validated domain profile
///
/// Only [`crate::validate`] and [`crate::validate_yaml`] construct this type,
/// so every instance satisfies the contract. Fields are read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainProfile {
    pub(crate) domain_name: String,
    pub(crate) version: String,
    pub(crate) display_name: String,
    pub(crate) description: String,
    pub(crate) layer_names: Vec<String>,
    pub(crate) weights: Vec<f64>,
    pub(crate) hierarchy: BTreeMap<String, HierarchyLevel>,
    pub(crate) thresholds: BTreeMap<String, f64>,
    pub(crate) temporal_allowlist: Vec<KernelType>,
    pub(crate) interaction_rules: InteractionRules,
    pub(crate) guardrails: Guardrails,
}

impl DomainProfile {
    /// Unique domain name
    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    /// Semantic version of the document
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Human-readable name
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Free-text description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Ordered layer names
    pub fn layer_names(&self) -> &[String] {
        &self.layer_names
    }

    /// Weights aligned with [`Self::layer_names`]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Hierarchy level for each layer
    pub fn hierarchy(&self) -> &BTreeMap<String, HierarchyLevel> {
        &self.hierarchy
    }

    /// Named thresholds
    pub fn thresholds(&self) -> &BTreeMap<String, f64> {
        &self.thresholds
    }

    /// Kernel types callers may request
    pub fn temporal_allowlist(&self) -> &[KernelType] {
        &self.temporal_allowlist
    }

    /// Interaction coefficient policy
    pub fn interaction_rules(&self) -> &InteractionRules {
        &self.interaction_rules
    }

    /// Guardrails for interpretive layers
    pub fn guardrails(&self) -> &Guardrails {
        &self.guardrails
    }

    /// Primary detection threshold, `thresholds["detection"]`
    pub fn detection_threshold(&self) -> f64 {
        // present by construction
        self.thresholds[DETECTION_THRESHOLD_KEY]
    }

    /// Whether the named kernel type is on this profile's allowlist
    pub fn allows_kernel(&self, kernel_type: &str) -> bool {
        self.temporal_allowlist
            .iter()
            .any(|kernel| kernel.as_str() == kernel_type)
    }

    /// Public metadata for discovery tools
    pub fn descriptor(&self) -> ProfileDescriptor {
        ProfileDescriptor {
            domain_name: self.domain_name.clone(),
            version: self.version.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            layer_names: self.layer_names.clone(),
            thresholds: self.thresholds.clone(),
            temporal_allowlist: self.temporal_allowlist.clone(),
        }
    }
}
