//! YAML profile documents

use crate::error::{ProfileDocumentError, ValidationErrors};
use crate::profile::DomainProfile;
use crate::validator::validate;
use serde_json::Value;
use std::path::Path;

/// Parse YAML text and validate it as a profile
///
/// Unparseable text yields [`ProfileDocumentError::Syntax`]; a document that
/// parses to anything other than a mapping is a contract error at `root`.
pub fn validate_yaml(text: &str) -> Result<DomainProfile, ProfileDocumentError> {
    let payload: Value =
        serde_yaml::from_str(text).map_err(|e| ProfileDocumentError::Syntax(e.to_string()))?;

    if !payload.is_object() {
        return Err(ValidationErrors::single("root", "profile YAML must be a mapping").into());
    }

    Ok(validate(&payload)?)
}

/// Read a YAML file and validate it as a profile
pub fn validate_file(path: impl AsRef<Path>) -> Result<DomainProfile, ProfileDocumentError> {
    let text = std::fs::read_to_string(path)?;
    validate_yaml(&text)
}

/// Serialize a profile as a YAML document that validates back to an equal profile
pub fn to_yaml(profile: &DomainProfile) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(profile)
}

/// Serialize a profile as an untyped payload accepted by [`validate`]
pub fn to_value(profile: &DomainProfile) -> Result<Value, serde_json::Error> {
    serde_json::to_value(profile)
}
