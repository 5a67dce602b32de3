//! Audit trail derived from the detector's `overrides_applied` block
//!
//! The detector reports what it did with each optional override. Two shapes
//! are recognized per entry: a truthy `clamped` flag, or a mapping of field
//! name to detail under `clamped`/`rejected`. Anything else is ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Normalized audit block of a detection envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditSummary {
    /// The detector's report, as returned
    #[serde(default)]
    pub overrides_applied: Map<String, Value>,

    /// Dotted names of overrides the detector clamped
    #[serde(default)]
    pub clamped_fields: Vec<String>,

    /// Dotted names of overrides the detector rejected or ignored
    #[serde(default)]
    pub rejected_fields: Vec<String>,

    /// Calibration block
    #[serde(default)]
    pub calibration: Map<String, Value>,
}

/// Truthiness of a loosely-typed flag
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn section<'a>(overrides: &'a Map<String, Value>, name: &str) -> Option<&'a Map<String, Value>> {
    overrides.get(name).and_then(Value::as_object)
}

fn flag_set(overrides: &Map<String, Value>, name: &str, flag: &str) -> bool {
    section(overrides, name)
        .and_then(|meta| meta.get(flag))
        .is_some_and(is_truthy)
}

fn keyed(overrides: &Map<String, Value>, name: &str, key: &str, prefix: &str) -> Vec<String> {
    section(overrides, name)
        .and_then(|meta| meta.get(key))
        .and_then(Value::as_object)
        .map(|fields| {
            fields
                .keys()
                .map(|field| format!("{}.{}", prefix, field))
                .collect()
        })
        .unwrap_or_default()
}

/// Overrides the detector clamped, sorted and de-duplicated
pub fn extract_clamped_fields(overrides: &Map<String, Value>) -> Vec<String> {
    let mut fields = BTreeSet::new();

    if flag_set(overrides, "threshold_overrides", "clamped") {
        fields.insert("threshold_overrides".to_string());
    }
    fields.extend(keyed(overrides, "temporal_config", "clamped", "temporal_config"));
    if flag_set(overrides, "f_time", "clamped") {
        fields.insert("f_time".to_string());
    }
    fields.extend(keyed(overrides, "interaction", "clamped", "interaction"));

    fields.into_iter().collect()
}

/// Overrides the detector rejected or ignored, sorted and de-duplicated
pub fn extract_rejected_fields(overrides: &Map<String, Value>) -> Vec<String> {
    let mut fields = BTreeSet::new();

    fields.extend(keyed(overrides, "temporal_config", "rejected", "temporal_config"));
    fields.extend(keyed(overrides, "interaction", "rejected", "interaction"));

    // ignored threshold keys are reported singular, as the caller named them
    if let Some(keys) = section(overrides, "threshold_overrides")
        .and_then(|meta| meta.get("ignored_keys"))
        .and_then(Value::as_array)
    {
        for key in keys {
            let key = match key {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            fields.insert(format!("threshold_override.{}", key));
        }
    }

    fields.into_iter().collect()
}
