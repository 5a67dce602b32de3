//! CIP Gatekeeper
//!
//! Validates domain profile documents against the canonical contract.
//!
//! The Gatekeeper provides:
//! - Field-level checks (patterns, ranges, membership in fixed sets)
//! - Cross-field checks (weights vs layers, hierarchy coverage, detection threshold)
//! - A closed schema: unknown keys are rejected at every level
//! - Aggregated, path-qualified errors so one pass shows every defect
//!
//! A [`DomainProfile`] can only be obtained through validation, so every
//! value in circulation satisfies the contract.
//!
//! # Examples
//!
//! ```
//! let text = r#"
//! domain_name: signal_core
//! layer_names: [alpha, beta, gamma]
//! weights: [0.5, 0.3, 0.2]
//! hierarchy: {alpha: Micro, beta: Meso, gamma: Macro}
//! "#;
//!
//! let profile = cip_gatekeeper::validate_yaml(text).unwrap();
//! assert_eq!(profile.detection_threshold(), 0.4);
//! ```

#![warn(missing_docs)]

mod document;
mod error;
mod profile;
mod validator;

pub use document::{to_value, to_yaml, validate_file, validate_yaml};
pub use error::{FieldError, ProfileDocumentError, ValidationErrors};
pub use profile::{DomainProfile, Guardrails, InteractionRules};
pub use validator::validate;
