//! CIP Rust SDK
//!
//! Entry points for applications that run profile-based detection in process:
//! load a registry, detect against a named profile, or translate raw domain
//! context into layer values first.
//!
//! # Example
//!
//! ```no_run
//! use cip_sdk::{load_registry, safe_detect, DetectionRequest, Settings};
//!
//! let settings = Settings::load(None).expect("Failed to load settings");
//! let registry = load_registry(&settings.profiles_dir).expect("Failed to load profiles");
//! let detector = settings.detector().expect("Failed to build detector");
//!
//! let envelope = safe_detect(
//!     detector.as_ref(),
//!     &registry,
//!     "customer_signal_core",
//!     DetectionRequest::new([0.62, 0.71, 0.45, 0.58], "friction"),
//! ).expect("Detection failed");
//! println!("{}", envelope.result["m_score"]);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod wrappers;

pub use config::Settings;
pub use error::SdkError;
pub use wrappers::{detect_from_translator, load_registry, safe_detect};

pub use cip_domain::{Detector, DomainTranslator, TranslationResult};
pub use cip_registry::ProfileRegistry;
pub use cip_runtime::{DetectionEnvelope, DetectionRequest};
