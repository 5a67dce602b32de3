//! Detection envelope builder
//!
//! Wraps one detector call with the checks a profile imposes: modes are
//! parsed, layer values are coerced and clamped, and the temporal kernel is
//! held to the profile's allowlist before the detector runs. The detector's
//! raw result is then wrapped with an audit trail.

use crate::audit::{extract_clamped_fields, extract_rejected_fields, is_truthy, AuditSummary};
use crate::envelope::DetectionEnvelope;
use crate::error::DetectionError;
use crate::request::DetectionRequest;
use cip_domain::{
    DetectionMode, Detector, DetectorParams, InteractionMode, InteractionOverrideMode,
};
use cip_gatekeeper::DomainProfile;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

/// Source tag on calibration blocks synthesized here
pub const CALIBRATION_SOURCE: &str = "cip-mantic-core";

/// Run one detection against a validated profile
///
/// # Errors
///
/// - [`DetectionError::InvalidArgument`] for a bad mode or layer values
/// - [`DetectionError::PolicyViolation`] for a kernel outside the allowlist
/// - [`DetectionError::Unavailable`] / [`DetectionError::Detector`] from the detector
///
/// Argument and policy errors are raised before the detector is called.
pub fn run_detection(
    detector: &dyn Detector,
    profile: &DomainProfile,
    request: DetectionRequest,
) -> Result<DetectionEnvelope, DetectionError> {
    let mode = DetectionMode::parse(&request.mode).ok_or_else(|| {
        DetectionError::InvalidArgument("mode must be 'friction' or 'emergence'".to_string())
    })?;
    let interaction_mode = InteractionMode::parse(&request.interaction_mode).ok_or_else(|| {
        DetectionError::InvalidArgument(
            "interaction_mode must be 'dynamic' or 'base'".to_string(),
        )
    })?;
    let interaction_override_mode =
        InteractionOverrideMode::parse(&request.interaction_override_mode).ok_or_else(|| {
            DetectionError::InvalidArgument(
                "interaction_override_mode must be 'scale' or 'replace'".to_string(),
            )
        })?;

    let layer_values = normalize_layer_values(&request.layer_values, profile.layer_names().len())?;
    enforce_temporal_allowlist(profile, request.temporal_config.as_ref())?;

    debug!(
        "Running {} detection for '{}' over {} layers",
        mode,
        profile.domain_name(),
        layer_values.len()
    );

    let params = DetectorParams {
        domain_name: profile.domain_name().to_string(),
        layer_names: profile.layer_names().to_vec(),
        weights: profile.weights().to_vec(),
        layer_values: layer_values.clone(),
        mode,
        f_time: request.f_time,
        threshold_override: request.threshold_override,
        temporal_config: request.temporal_config,
        interaction_mode,
        interaction_override: request.interaction_override,
        interaction_override_mode,
        layer_hierarchy: profile.hierarchy().clone(),
        detection_threshold: profile.detection_threshold(),
    };

    let result = detector.detect(&params)?;

    let overrides_applied = result
        .get("overrides_applied")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let audit = AuditSummary {
        clamped_fields: extract_clamped_fields(&overrides_applied),
        rejected_fields: extract_rejected_fields(&overrides_applied),
        calibration: calibration(&result, &overrides_applied, profile, mode),
        overrides_applied,
    };

    Ok(DetectionEnvelope::new(
        profile.descriptor(),
        mode,
        layer_values,
        result,
        audit,
    ))
}

/// Coerce raw layer values to numbers and clamp them to [0, 1]
fn normalize_layer_values(raw: &[Value], layer_count: usize) -> Result<Vec<f64>, DetectionError> {
    if raw.len() != layer_count {
        return Err(DetectionError::InvalidArgument(format!(
            "layer_values length ({}) must match profile layer count ({})",
            raw.len(),
            layer_count
        )));
    }

    raw.iter()
        .enumerate()
        .map(|(idx, value)| {
            coerce_number(value)
                .map(|n| n.clamp(0.0, 1.0))
                .ok_or_else(|| {
                    DetectionError::InvalidArgument(format!("layer_values[{}] must be numeric", idx))
                })
        })
        .collect()
}

/// Numbers, numeric strings and booleans coerce; NaN does not
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }?;
    (!number.is_nan()).then_some(number)
}

fn enforce_temporal_allowlist(
    profile: &DomainProfile,
    temporal_config: Option<&Map<String, Value>>,
) -> Result<(), DetectionError> {
    let Some(kernel) = temporal_config
        .and_then(|config| config.get("kernel_type"))
        .filter(|kernel| is_truthy(kernel))
    else {
        return Ok(());
    };

    let kernel = match kernel {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if profile.allows_kernel(&kernel) {
        return Ok(());
    }

    warn!(
        "Rejected kernel_type '{}' for domain '{}'",
        kernel,
        profile.domain_name()
    );
    Err(DetectionError::PolicyViolation {
        kernel,
        domain: profile.domain_name().to_string(),
        allowed: profile
            .temporal_allowlist()
            .iter()
            .map(|k| k.as_str().to_string())
            .collect(),
    })
}

/// First non-empty calibration block: the result's, then the overrides
/// report's, then one synthesized from the profile.
fn calibration(
    result: &Map<String, Value>,
    overrides_applied: &Map<String, Value>,
    profile: &DomainProfile,
    mode: DetectionMode,
) -> Map<String, Value> {
    [result.get("calibration"), overrides_applied.get("calibration")]
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
        .find(|block| !block.is_empty())
        .cloned()
        .unwrap_or_else(|| {
            let mut block = Map::new();
            block.insert("domain_name".into(), json!(profile.domain_name()));
            block.insert("mode".into(), json!(mode.as_str()));
            block.insert("source".into(), json!(CALIBRATION_SOURCE));
            block
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::MockDetector;
    use proptest::prelude::*;

    fn profile() -> DomainProfile {
        cip_gatekeeper::validate(&json!({
            "domain_name": "customer_signal_core",
            "layer_names": ["engagement", "sentiment", "support_load", "retention"],
            "weights": [0.3, 0.25, 0.25, 0.2],
            "hierarchy": {
                "engagement": "Micro",
                "sentiment": "Meso",
                "support_load": "Macro",
                "retention": "Meta"
            },
            "temporal_allowlist": ["linear", "memory", "exponential"]
        }))
        .unwrap()
    }

    fn result_with(overrides: Value) -> Map<String, Value> {
        json!({"m_score": 0.42, "overrides_applied": overrides})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_envelope_shape() {
        let detector = MockDetector::new(result_with(json!({})));
        let envelope = run_detection(
            &detector,
            &profile(),
            DetectionRequest::new([0.6, 0.7, 0.5, 0.4], "friction"),
        )
        .unwrap();

        assert_eq!(envelope.contract_version, "1.0.0");
        assert_eq!(envelope.mode, DetectionMode::Friction);
        assert_eq!(envelope.domain_profile.domain_name, "customer_signal_core");
        assert_eq!(envelope.result["m_score"], json!(0.42));
        assert_eq!(detector.call_count(), 1);
    }

    #[test]
    fn test_layer_values_are_clamped() {
        let detector = MockDetector::new(result_with(json!({})));
        let envelope = run_detection(
            &detector,
            &profile(),
            DetectionRequest::new([1.2, -0.2, 0.5, 0.4], "friction"),
        )
        .unwrap();

        assert_eq!(envelope.layer_values, vec![1.0, 0.0, 0.5, 0.4]);
        let params = detector.last_params().unwrap();
        assert_eq!(params.layer_values, vec![1.0, 0.0, 0.5, 0.4]);
    }

    #[test]
    fn test_layer_values_coerce_strings_and_bools() {
        let detector = MockDetector::new(result_with(json!({})));
        let request = DetectionRequest::new(
            vec![json!("0.25"), json!(true), json!(false), json!(" 0.5 ")],
            "emergence",
        );
        let envelope = run_detection(&detector, &profile(), request).unwrap();
        assert_eq!(envelope.layer_values, vec![0.25, 1.0, 0.0, 0.5]);
    }

    #[test]
    fn test_non_numeric_layer_value_fails() {
        let detector = MockDetector::new(result_with(json!({})));
        for bad in [json!(null), json!("high"), json!([0.1]), json!({"v": 1}), json!("NaN")] {
            let request = DetectionRequest::new(vec![json!(0.1), bad, json!(0.2), json!(0.3)], "friction");
            let err = run_detection(&detector, &profile(), request).unwrap_err();
            assert_eq!(err.to_string(), "layer_values[1] must be numeric");
        }
        assert_eq!(detector.call_count(), 0);
    }

    #[test]
    fn test_layer_count_mismatch() {
        let detector = MockDetector::new(result_with(json!({})));
        let err = run_detection(
            &detector,
            &profile(),
            DetectionRequest::new([0.1, 0.2, 0.3], "friction"),
        )
        .unwrap_err();

        assert!(matches!(err, DetectionError::InvalidArgument(_)));
        assert_eq!(
            err.to_string(),
            "layer_values length (3) must match profile layer count (4)"
        );
    }

    #[test]
    fn test_invalid_modes() {
        let detector = MockDetector::new(result_with(json!({})));
        let values = [0.1, 0.2, 0.3, 0.4];

        let err = run_detection(&detector, &profile(), DetectionRequest::new(values, "chaos")).unwrap_err();
        assert_eq!(err.to_string(), "mode must be 'friction' or 'emergence'");

        let request = DetectionRequest::new(values, "friction").with_interaction_mode("invalid");
        let err = run_detection(&detector, &profile(), request).unwrap_err();
        assert!(matches!(err, DetectionError::InvalidArgument(_)));

        let request = DetectionRequest::new(values, "friction").with_interaction_override_mode("blend");
        let err = run_detection(&detector, &profile(), request).unwrap_err();
        assert!(err.to_string().contains("interaction_override_mode"));

        assert_eq!(detector.call_count(), 0);
    }

    #[test]
    fn test_disallowed_kernel_fails_before_detector() {
        let detector = MockDetector::new(result_with(json!({})));
        let config = json!({"kernel_type": "power_law", "t": 1}).as_object().cloned().unwrap();
        let request = DetectionRequest::new([0.6, 0.7, 0.5, 0.4], "friction").with_temporal_config(config);

        let err = run_detection(&detector, &profile(), request).unwrap_err();
        match &err {
            DetectionError::PolicyViolation { kernel, domain, allowed } => {
                assert_eq!(kernel, "power_law");
                assert_eq!(domain, "customer_signal_core");
                assert_eq!(allowed, &vec!["linear", "memory", "exponential"]);
            }
            other => panic!("expected policy violation, got {:?}", other),
        }
        assert!(err.to_string().contains("not allowed"));
        assert_eq!(detector.call_count(), 0);
    }

    #[test]
    fn test_allowed_kernel_and_empty_kernel_pass() {
        let detector = MockDetector::new(result_with(json!({})));
        for config in [json!({"kernel_type": "memory"}), json!({"kernel_type": ""}), json!({"t": 3})] {
            let request = DetectionRequest::new([0.6, 0.7, 0.5, 0.4], "friction")
                .with_temporal_config(config.as_object().cloned().unwrap());
            assert!(run_detection(&detector, &profile(), request).is_ok());
        }
        assert_eq!(detector.call_count(), 3);
    }

    #[test]
    fn test_params_carry_profile_and_request() {
        let detector = MockDetector::new(result_with(json!({})));
        let request = DetectionRequest::new([0.6, 0.7, 0.5, 0.4], "emergence")
            .with_f_time(2.2)
            .with_interaction_mode("base")
            .with_interaction_override_mode("replace");
        run_detection(&detector, &profile(), request).unwrap();

        let params = detector.last_params().unwrap();
        assert_eq!(params.domain_name, "customer_signal_core");
        assert_eq!(params.weights, vec![0.3, 0.25, 0.25, 0.2]);
        assert_eq!(params.mode, DetectionMode::Emergence);
        assert_eq!(params.f_time, 2.2);
        assert_eq!(params.interaction_mode, InteractionMode::Base);
        assert_eq!(params.interaction_override_mode, InteractionOverrideMode::Replace);
        assert_eq!(params.layer_hierarchy.len(), 4);
        assert_eq!(params.detection_threshold, 0.4);
    }

    #[test]
    fn test_audit_from_overrides() {
        let detector = MockDetector::new(result_with(json!({
            "f_time": {"requested": 2.2, "used": 2.0, "clamped": true},
            "threshold_overrides": {"ignored_keys": ["alignment"]}
        })));
        let request = DetectionRequest::new([0.6, 0.7, 0.5, 0.4], "emergence")
            .with_threshold_override([("alignment".to_string(), 0.5)].into());
        let envelope = run_detection(&detector, &profile(), request).unwrap();

        assert_eq!(envelope.audit.clamped_fields, vec!["f_time"]);
        assert_eq!(envelope.audit.rejected_fields, vec!["threshold_override.alignment"]);
        assert_eq!(envelope.audit.overrides_applied["f_time"]["requested"], json!(2.2));
    }

    #[test]
    fn test_missing_overrides_block_is_empty() {
        let result = json!({"m_score": 0.1}).as_object().cloned().unwrap();
        let detector = MockDetector::new(result);
        let envelope = run_detection(
            &detector,
            &profile(),
            DetectionRequest::new([0.6, 0.7, 0.5, 0.4], "friction"),
        )
        .unwrap();

        assert!(envelope.audit.overrides_applied.is_empty());
        assert!(envelope.audit.clamped_fields.is_empty());
    }

    #[test]
    fn test_calibration_precedence() {
        let values = [0.6, 0.7, 0.5, 0.4];

        // synthesized
        let detector = MockDetector::new(result_with(json!({})));
        let envelope = run_detection(&detector, &profile(), DetectionRequest::new(values, "friction")).unwrap();
        assert_eq!(
            Value::Object(envelope.audit.calibration),
            json!({"domain_name": "customer_signal_core", "mode": "friction", "source": "cip-mantic-core"})
        );

        // from the overrides report
        let detector = MockDetector::new(result_with(json!({"calibration": {"scale": 0.9}})));
        let envelope = run_detection(&detector, &profile(), DetectionRequest::new(values, "friction")).unwrap();
        assert_eq!(envelope.audit.calibration["scale"], json!(0.9));

        // from the result, ahead of the overrides report
        let mut result = result_with(json!({"calibration": {"scale": 0.9}}));
        result.insert("calibration".into(), json!({"scale": 0.5}));
        let detector = MockDetector::new(result);
        let envelope = run_detection(&detector, &profile(), DetectionRequest::new(values, "friction")).unwrap();
        assert_eq!(envelope.audit.calibration["scale"], json!(0.5));

        // an empty result block falls through
        let mut result = result_with(json!({}));
        result.insert("calibration".into(), json!({}));
        let detector = MockDetector::new(result);
        let envelope = run_detection(&detector, &profile(), DetectionRequest::new(values, "emergence")).unwrap();
        assert_eq!(envelope.audit.calibration["mode"], json!("emergence"));
    }

    #[test]
    fn test_detector_errors_propagate() {
        let detector = MockDetector::failing("detect exploded");
        let err = run_detection(
            &detector,
            &profile(),
            DetectionRequest::new([0.6, 0.7, 0.5, 0.4], "friction"),
        )
        .unwrap_err();
        assert!(matches!(err, DetectionError::Detector(_)));
        assert_eq!(err.to_string(), "detect exploded");

        let detector = MockDetector::unavailable("detector is not installed");
        let err = run_detection(
            &detector,
            &profile(),
            DetectionRequest::new([0.6, 0.7, 0.5, 0.4], "friction"),
        )
        .unwrap_err();
        assert!(matches!(err, DetectionError::Unavailable(_)));
    }

    proptest! {
        #[test]
        fn clamped_values_stay_in_unit_interval(values in proptest::collection::vec(-10.0f64..10.0, 4)) {
            let detector = MockDetector::new(result_with(json!({})));
            let envelope = run_detection(
                &detector,
                &profile(),
                DetectionRequest::new(values.clone(), "friction"),
            ).unwrap();

            for (raw, clamped) in values.iter().zip(&envelope.layer_values) {
                prop_assert!((0.0..=1.0).contains(clamped));
                if (0.0..=1.0).contains(raw) {
                    prop_assert_eq!(raw, clamped);
                }
            }
        }
    }
}
