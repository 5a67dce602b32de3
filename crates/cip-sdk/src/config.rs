//! Settings for hosts of the core (tool server, CLI)

use crate::error::SdkError;
use cip_domain::Detector;
use cip_runtime::{HttpDetector, UnconfiguredDetector, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Runtime settings
///
/// Read from an optional TOML file, then overridden by `CIP_PROFILES_DIR`,
/// `CIP_LOG_LEVEL`, `CIP_DETECTOR_URL` and `CIP_DETECTOR_TIMEOUT_SECS`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Directory holding profile documents
    #[serde(default = "default_profiles_dir")]
    pub profiles_dir: PathBuf,

    /// Log filter directive, e.g. `info` or `cip_runtime=debug`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Detection endpoint; detection is unavailable without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detector_url: Option<String>,

    /// Request timeout for the detection endpoint
    #[serde(default = "default_detector_timeout_secs")]
    pub detector_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profiles_dir: default_profiles_dir(),
            log_level: default_log_level(),
            detector_url: None,
            detector_timeout_secs: default_detector_timeout_secs(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> Result<Self, SdkError> {
        Ok(toml::from_str(text)?)
    }

    /// Read settings from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SdkError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Load settings from an optional file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, SdkError> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, SdkError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("CIP_PROFILES_DIR") {
            self.profiles_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup("CIP_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(url) = lookup("CIP_DETECTOR_URL") {
            self.detector_url = (!url.trim().is_empty()).then_some(url);
        }
        if let Some(secs) = lookup("CIP_DETECTOR_TIMEOUT_SECS") {
            self.detector_timeout_secs = secs.trim().parse().map_err(|_| {
                SdkError::Config(format!(
                    "CIP_DETECTOR_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    secs
                ))
            })?;
        }
        Ok(self)
    }

    /// Build the configured detector
    ///
    /// Without a `detector_url` every detection reports the detector as unavailable.
    pub fn detector(&self) -> Result<Arc<dyn Detector>, SdkError> {
        match &self.detector_url {
            Some(url) => {
                let detector =
                    HttpDetector::new(url.clone(), Duration::from_secs(self.detector_timeout_secs))
                        .map_err(|e| SdkError::Config(format!("Failed to build detector client: {}", e)))?;
                Ok(Arc::new(detector))
            }
            None => Ok(Arc::new(UnconfiguredDetector)),
        }
    }
}

fn default_profiles_dir() -> PathBuf {
    PathBuf::from("profiles")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_detector_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.profiles_dir, PathBuf::from("profiles"));
        assert_eq!(settings.log_level, "info");
        assert!(settings.detector_url.is_none());
        assert_eq!(settings.detector_timeout_secs, 30);
    }

    #[test]
    fn test_from_toml_partial() {
        let settings = Settings::from_toml(
            r#"
            profiles_dir = "/etc/cip/profiles"
            detector_url = "http://localhost:8020/detect"
            "#,
        )
        .unwrap();

        assert_eq!(settings.profiles_dir, PathBuf::from("/etc/cip/profiles"));
        assert_eq!(settings.detector_url.as_deref(), Some("http://localhost:8020/detect"));
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        let err = Settings::from_toml("cip_port = 8010").unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cip.toml");
        std::fs::write(&path, "log_level = \"debug\"\n").unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.log_level, "debug");

        assert!(matches!(
            Settings::from_file(dir.path().join("missing.toml")),
            Err(SdkError::Io(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CIP_PROFILES_DIR", "custom"),
            ("CIP_LOG_LEVEL", "warn"),
            ("CIP_DETECTOR_URL", "http://detector:9000"),
            ("CIP_DETECTOR_TIMEOUT_SECS", "5"),
        ]);

        let settings = Settings::default()
            .with_env_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(settings.profiles_dir, PathBuf::from("custom"));
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.detector_url.as_deref(), Some("http://detector:9000"));
        assert_eq!(settings.detector_timeout_secs, 5);
    }

    #[test]
    fn test_bad_timeout_override() {
        let result = Settings::default().with_env_overrides(|key| {
            (key == "CIP_DETECTOR_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(SdkError::Config(_))));
    }

    #[test]
    fn test_detector_selection() {
        let settings = Settings::default();
        assert!(settings.detector().is_ok());

        let settings = Settings {
            detector_url: Some("http://127.0.0.1:9/detect".to_string()),
            ..Settings::default()
        };
        assert!(settings.detector().is_ok());
    }
}
