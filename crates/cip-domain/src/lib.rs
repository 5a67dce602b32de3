//! CIP Domain Layer
//!
//! Shared vocabulary for the CIP Mantic Core workspace: the fixed sets a
//! domain profile is validated against, the enumerations that appear in
//! profiles and detection requests, the public profile descriptor, and the
//! trait seams for the external detector and for domain translators.
//!
//! ## Key Concepts
//!
//! - **Profile**: a validated configuration document describing a scoring domain
//! - **Layer**: one named input dimension contributing to a weighted score
//! - **Kernel type**: a temporal decay/growth family, restricted per profile
//! - **Descriptor**: the subset of a profile safe for external discovery
//!
//! ## Architecture
//!
//! This crate holds no behavior beyond parsing and lookups. Validation lives
//! in `cip-gatekeeper`, storage in `cip-registry`, and the detection call in
//! `cip-runtime`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod descriptor;
pub mod hierarchy;
pub mod kernel;
pub mod mode;
pub mod traits;

// Re-exports for convenience
pub use descriptor::ProfileDescriptor;
pub use hierarchy::HierarchyLevel;
pub use kernel::KernelType;
pub use mode::{DetectionMode, InteractionMode, InteractionOverrideMode};
pub use traits::{
    Detector, DetectorError, DetectorParams, DomainTranslator, InteractionOverride,
    TranslationResult,
};
