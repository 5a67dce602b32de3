//! Mock detector for deterministic testing

use cip_domain::{Detector, DetectorError, DetectorParams};
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone)]
enum Behavior {
    Fixed(Map<String, Value>),
    Echo,
    Fail(String),
    Unavailable(String),
}

/// Mock detector that never computes a real score
///
/// Returns a configured result (or a configured failure) and records every
/// call. Clones share the call log.
///
/// # Examples
///
/// ```
/// use cip_runtime::MockDetector;
/// use serde_json::json;
///
/// let detector = MockDetector::new(json!({"m_score": 0.3}).as_object().cloned().unwrap());
/// assert_eq!(detector.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockDetector {
    behavior: Behavior,
    calls: Arc<Mutex<Vec<DetectorParams>>>,
}

impl MockDetector {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Return `result` for every call
    pub fn new(result: Map<String, Value>) -> Self {
        Self::with_behavior(Behavior::Fixed(result))
    }

    /// Return a result that reflects the parameters back
    ///
    /// The result carries an `m_score` (weighted mean of the layer values), the
    /// requested mode, and an `overrides_applied` block reporting `f_time`.
    pub fn echo() -> Self {
        Self::with_behavior(Behavior::Echo)
    }

    /// Fail every call with `message` as a detector error
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fail(message.into()))
    }

    /// Report the detector as unavailable on every call
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Unavailable(reason.into()))
    }

    /// Number of calls made
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Parameters of the most recent call
    pub fn last_params(&self) -> Option<DetectorParams> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn echo_result(params: &DetectorParams) -> Map<String, Value> {
        let m_score: f64 = params
            .weights
            .iter()
            .zip(&params.layer_values)
            .map(|(w, v)| w * v)
            .sum();

        let mut result = Map::new();
        result.insert("m_score".into(), json!(m_score));
        result.insert("mode".into(), json!(params.mode.as_str()));
        result.insert("layer_values".into(), json!(params.layer_values));
        result.insert(
            "overrides_applied".into(),
            json!({
                "f_time": {
                    "requested": params.f_time,
                    "used": params.f_time,
                    "clamped": false
                }
            }),
        );
        result
    }
}

impl Default for MockDetector {
    fn default() -> Self {
        Self::echo()
    }
}

impl Detector for MockDetector {
    fn detect(&self, params: &DetectorParams) -> Result<Map<String, Value>, DetectorError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(params.clone());

        match &self.behavior {
            Behavior::Fixed(result) => Ok(result.clone()),
            Behavior::Echo => Ok(Self::echo_result(params)),
            Behavior::Fail(message) => Err(DetectorError::failed(message.clone())),
            Behavior::Unavailable(reason) => Err(DetectorError::Unavailable(reason.clone())),
        }
    }
}
