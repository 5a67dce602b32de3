//! Validate tool - Check a profile document against the contract

use cip_domain::ProfileDescriptor;
use cip_gatekeeper::{to_value, validate_yaml};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters for validating a profile document
#[derive(Debug, Deserialize)]
pub struct ValidateParams {
    /// Profile document as YAML text
    pub profile_yaml: String,
}

/// Result of validating a profile document
///
/// Contract violations are reported here with `status: ok`; the call itself
/// succeeded.
#[derive(Debug, Serialize)]
pub struct ValidateResult {
    /// Always `ok`
    pub status: &'static str,
    /// Whether the document satisfies the contract
    pub valid: bool,
    /// Path-qualified violations, empty when valid
    pub errors: Vec<String>,
    /// The full validated profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Value>,
    /// Public descriptor of the validated profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<ProfileDescriptor>,
}

/// Handle validate_domain_profile tool invocation
pub fn handle_validate(params: ValidateParams) -> Result<ValidateResult, serde_json::Error> {
    let result = match validate_yaml(&params.profile_yaml) {
        Ok(profile) => ValidateResult {
            status: "ok",
            valid: true,
            errors: Vec::new(),
            profile: Some(to_value(&profile)?),
            descriptor: Some(profile.descriptor()),
        },
        Err(e) => ValidateResult {
            status: "ok",
            valid: false,
            errors: e.messages(),
            profile: None,
            descriptor: None,
        },
    };
    Ok(result)
}
