//! Detection response envelope

use crate::audit::AuditSummary;
use cip_domain::{DetectionMode, ProfileDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Version of the envelope shape
pub const CONTRACT_VERSION: &str = "1.0.0";

/// Envelope status; successful envelopes are the only kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// Detection completed
    #[default]
    Ok,
}

/// Stable detection response for downstream consumers
///
/// The key set is closed: serialization emits exactly these fields and
/// deserialization rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectionEnvelope {
    /// Always `ok`
    pub status: EnvelopeStatus,
    /// Always [`CONTRACT_VERSION`]
    pub contract_version: String,
    /// Descriptor of the profile the detection ran under
    pub domain_profile: ProfileDescriptor,
    /// Detection mode
    pub mode: DetectionMode,
    /// Layer values after clamping to [0, 1]
    pub layer_values: Vec<f64>,
    /// Raw detector result
    pub result: Map<String, Value>,
    /// Derived audit trail
    pub audit: AuditSummary,
}

impl DetectionEnvelope {
    /// Create an envelope at the current contract version
    pub fn new(
        domain_profile: ProfileDescriptor,
        mode: DetectionMode,
        layer_values: Vec<f64>,
        result: Map<String, Value>,
        audit: AuditSummary,
    ) -> Self {
        Self {
            status: EnvelopeStatus::Ok,
            contract_version: CONTRACT_VERSION.to_string(),
            domain_profile,
            mode,
            layer_values,
            result,
            audit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn envelope() -> DetectionEnvelope {
        let descriptor = ProfileDescriptor {
            domain_name: "signal_core".to_string(),
            version: "1.0.0".to_string(),
            display_name: String::new(),
            description: String::new(),
            layer_names: vec!["a1".into(), "b1".into(), "c1".into()],
            thresholds: BTreeMap::from([("detection".to_string(), 0.4)]),
            temporal_allowlist: cip_domain::KernelType::default_allowlist(),
        };
        DetectionEnvelope::new(
            descriptor,
            DetectionMode::Friction,
            vec![0.6, 0.6, 0.6],
            Map::new(),
            AuditSummary::default(),
        )
    }

    #[test]
    fn test_envelope_key_set() {
        let value = serde_json::to_value(envelope()).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "audit",
                "contract_version",
                "domain_profile",
                "layer_values",
                "mode",
                "result",
                "status"
            ]
        );

        let audit_keys: Vec<&str> = value["audit"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(audit_keys.len(), 4);
        assert_eq!(value["status"], "ok");
        assert_eq!(value["contract_version"], "1.0.0");
        assert_eq!(value["mode"], "friction");
    }

    #[test]
    fn test_envelope_rejects_extra_keys() {
        let mut value = serde_json::to_value(envelope()).unwrap();
        assert_eq!(
            serde_json::from_value::<DetectionEnvelope>(value.clone()).unwrap(),
            envelope()
        );

        value["extra"] = serde_json::json!(true);
        assert!(serde_json::from_value::<DetectionEnvelope>(value).is_err());
    }

    #[test]
    fn test_envelope_rejects_other_status() {
        let mut value = serde_json::to_value(envelope()).unwrap();
        value["status"] = serde_json::json!("error");
        assert!(serde_json::from_value::<DetectionEnvelope>(value).is_err());
    }
}
