//! Detect command implementation.

use crate::cli::DetectArgs;
use crate::error::Result;
use crate::output::Formatter;
use cip_domain::DetectionMode;
use cip_runtime::DetectionRequest;
use cip_sdk::{load_registry, safe_detect, Settings};
use serde_json::{json, Map};
use std::collections::BTreeMap;
use tracing::debug;

/// Build a detection request from command arguments
pub fn build_request(args: &DetectArgs) -> DetectionRequest {
    let mode = DetectionMode::from(args.mode);
    let mut request = DetectionRequest::new(args.values.iter().copied(), mode.as_str())
        .with_f_time(args.f_time)
        .with_interaction_mode(args.interaction_mode.as_str())
        .with_interaction_override_mode(args.override_mode.as_str());

    if !args.thresholds.is_empty() {
        let overrides: BTreeMap<String, f64> = args.thresholds.iter().cloned().collect();
        request = request.with_threshold_override(overrides);
    }

    if let Some(kernel) = &args.kernel {
        let mut config = Map::new();
        config.insert("kernel_type".to_string(), json!(kernel));
        request = request.with_temporal_config(config);
    }

    request
}

/// Execute the detect command.
pub fn execute_detect(args: DetectArgs, settings: &Settings, formatter: &Formatter) -> Result<()> {
    let mut settings = settings.clone();
    if let Some(dir) = &args.profiles_dir {
        settings.profiles_dir = dir.clone();
    }
    if let Some(url) = &args.detector_url {
        settings.detector_url = Some(url.clone());
    }

    let registry = load_registry(&settings.profiles_dir)?;
    let detector = settings.detector()?;
    debug!(
        "Running {} detection for '{}' with {} profile(s) loaded",
        DetectionMode::from(args.mode),
        args.profile,
        registry.len()
    );

    let envelope = safe_detect(detector.as_ref(), &registry, &args.profile, build_request(&args))?;
    println!("{}", formatter.format_envelope(&envelope)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;

    fn detect_args(argv: &[&str]) -> DetectArgs {
        let mut full = vec!["cip", "detect"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Detect(args) => args,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_build_request_defaults() {
        let request = build_request(&detect_args(&["signal_core", "--values", "0.1,0.2"]));
        assert_eq!(request.mode, "friction");
        assert_eq!(request.layer_values, vec![json!(0.1), json!(0.2)]);
        assert!(request.threshold_override.is_none());
        assert!(request.temporal_config.is_none());
    }

    #[test]
    fn test_build_request_overrides() {
        let request = build_request(&detect_args(&[
            "signal_core",
            "--values",
            "0.1,0.2",
            "--mode",
            "emergence",
            "--kernel",
            "memory",
            "-t",
            "detection=0.55",
        ]));
        assert_eq!(request.mode, "emergence");
        assert_eq!(request.temporal_config.unwrap()["kernel_type"], "memory");
        assert_eq!(request.threshold_override.unwrap()["detection"], 0.55);
    }
}
