//! Safe detection wrappers

use crate::error::SdkError;
use cip_domain::{Detector, DomainTranslator};
use cip_registry::ProfileRegistry;
use cip_runtime::{run_detection, DetectionEnvelope, DetectionRequest};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Load a profile registry from a directory
pub fn load_registry(profiles_dir: impl AsRef<Path>) -> Result<ProfileRegistry, SdkError> {
    Ok(ProfileRegistry::from_directory(profiles_dir)?)
}

/// Run detection against a registered profile
pub fn safe_detect(
    detector: &dyn Detector,
    registry: &ProfileRegistry,
    profile_name: &str,
    request: DetectionRequest,
) -> Result<DetectionEnvelope, SdkError> {
    let profile = registry.get(profile_name)?;
    Ok(run_detection(detector, profile, request)?)
}

/// Translate raw domain context, then run detection
///
/// The translator's layer values replace those on `request`; every other
/// option on `request` is forwarded unchanged.
pub fn detect_from_translator<T: DomainTranslator>(
    detector: &dyn Detector,
    registry: &ProfileRegistry,
    profile_name: &str,
    translator: &T,
    raw_context: &Map<String, Value>,
    request: DetectionRequest,
) -> Result<DetectionEnvelope, SdkError> {
    let translation = translator
        .translate(raw_context)
        .map_err(|e| SdkError::Translator(Box::new(e)))?;
    debug!(
        "Translated context into {} layer values for '{}'",
        translation.layer_values.len(),
        profile_name
    );

    safe_detect(
        detector,
        registry,
        profile_name,
        request.with_layer_values(translation.layer_values),
    )
}
