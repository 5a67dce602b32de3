//! Public profile descriptor

use crate::KernelType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The subset of a domain profile exposed to discovery and listing
///
/// Guardrails, interaction rules, weights and hierarchy stay internal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileDescriptor {
    /// Unique domain name
    pub domain_name: String,
    /// Semantic version of the profile document
    pub version: String,
    /// Human-readable name
    pub display_name: String,
    /// Free-text description
    pub description: String,
    /// Ordered layer names
    pub layer_names: Vec<String>,
    /// Named thresholds in (0, 1)
    pub thresholds: BTreeMap<String, f64>,
    /// Kernel types callers may request
    pub temporal_allowlist: Vec<KernelType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_has_closed_key_set() {
        let descriptor = ProfileDescriptor {
            domain_name: "signal_core".to_string(),
            version: "1.0.0".to_string(),
            display_name: String::new(),
            description: String::new(),
            layer_names: vec!["a1".into(), "b1".into(), "c1".into()],
            thresholds: BTreeMap::from([("detection".to_string(), 0.4)]),
            temporal_allowlist: vec![KernelType::Linear],
        };

        let value = serde_json::to_value(&descriptor).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "description",
                "display_name",
                "domain_name",
                "layer_names",
                "temporal_allowlist",
                "thresholds",
                "version"
            ]
        );
    }
}
