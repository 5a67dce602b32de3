//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use cip_domain::ProfileDescriptor;
use cip_runtime::DetectionEnvelope;
use colored::*;
use serde_json::Value;
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format profile descriptors.
    pub fn format_profiles(&self, profiles: &[ProfileDescriptor]) -> Result<String> {
        match self.format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(profiles)?),
            CliFormat::Table => Ok(self.format_profiles_table(profiles)),
            CliFormat::Quiet => Ok(profiles
                .iter()
                .map(|p| p.domain_name.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format profiles as a table.
    fn format_profiles_table(&self, profiles: &[ProfileDescriptor]) -> String {
        if profiles.is_empty() {
            return self.colorize("No profiles found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Name", "Version", "Layers", "Detection", "Kernels"]);

        for profile in profiles {
            let detection = profile
                .thresholds
                .get("detection")
                .map(|t| format!("{:.2}", t))
                .unwrap_or_default();
            let kernels = profile
                .temporal_allowlist
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            builder.push_record([
                profile.domain_name.as_str(),
                &profile.version,
                &profile.layer_names.join(", "),
                &detection,
                &kernels,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a detection envelope.
    pub fn format_envelope(&self, envelope: &DetectionEnvelope) -> Result<String> {
        match self.format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(envelope)?),
            CliFormat::Table => Ok(self.format_envelope_table(envelope)),
            CliFormat::Quiet => Ok(envelope
                .result
                .get("m_score")
                .map(Value::to_string)
                .unwrap_or_else(|| "-".to_string())),
        }
    }

    /// Format an envelope as a key/value table.
    fn format_envelope_table(&self, envelope: &DetectionEnvelope) -> String {
        let layers = envelope
            .domain_profile
            .layer_names
            .iter()
            .zip(&envelope.layer_values)
            .map(|(name, value)| format!("{}={:.3}", name, value))
            .collect::<Vec<_>>()
            .join(", ");
        let m_score = envelope
            .result
            .get("m_score")
            .map(Value::to_string)
            .unwrap_or_else(|| "-".to_string());

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Profile", envelope.domain_profile.domain_name.as_str()]);
        builder.push_record(["Mode", envelope.mode.as_str()]);
        builder.push_record(["Layers", layers.as_str()]);
        builder.push_record(["M score", m_score.as_str()]);
        builder.push_record(["Clamped", &list_or_dash(&envelope.audit.clamped_fields)]);
        builder.push_record(["Rejected", &list_or_dash(&envelope.audit.rejected_fields)]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format one lint line: `OK   path` or `FAIL path: error`.
    pub fn lint_line(&self, path: &Path, error: Option<&str>) -> String {
        match error {
            None => format!("{}   {}", self.colorize("OK", "green"), path.display()),
            Some(error) => format!("{} {}: {}", self.colorize("FAIL", "red"), path.display(), error),
        }
    }

    /// Format the lint summary.
    pub fn lint_summary(&self, checked: usize, failures: usize) -> String {
        let summary = format!("Checked {} profile file(s), failures: {}", checked, failures);
        if failures == 0 {
            summary
        } else {
            self.colorize(&summary, "red")
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn list_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cip_domain::{DetectionMode, KernelType};
    use cip_runtime::AuditSummary;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn descriptor() -> ProfileDescriptor {
        ProfileDescriptor {
            domain_name: "customer_signal_core".to_string(),
            version: "1.0.0".to_string(),
            display_name: "Customer Signal Core".to_string(),
            description: String::new(),
            layer_names: vec!["engagement".into(), "sentiment".into(), "retention".into()],
            thresholds: BTreeMap::from([("detection".to_string(), 0.4)]),
            temporal_allowlist: vec![KernelType::Linear, KernelType::Memory],
        }
    }

    fn envelope() -> DetectionEnvelope {
        let result = json!({"m_score": 0.42}).as_object().cloned().unwrap();
        DetectionEnvelope::new(
            descriptor(),
            DetectionMode::Friction,
            vec![0.6, 0.5, 1.0],
            result,
            AuditSummary {
                clamped_fields: vec!["f_time".to_string()],
                ..AuditSummary::default()
            },
        )
    }

    #[test]
    fn test_profiles_table() {
        let formatter = Formatter::new(CliFormat::Table, false);
        let output = formatter.format_profiles(&[descriptor()]).unwrap();
        assert!(output.contains("customer_signal_core"));
        assert!(output.contains("linear, memory"));
        assert!(output.contains("0.40"));
    }

    #[test]
    fn test_profiles_quiet_and_empty() {
        let formatter = Formatter::new(CliFormat::Quiet, false);
        assert_eq!(formatter.format_profiles(&[descriptor()]).unwrap(), "customer_signal_core");

        let formatter = Formatter::new(CliFormat::Table, false);
        assert!(formatter.format_profiles(&[]).unwrap().contains("No profiles found"));
    }

    #[test]
    fn test_envelope_formats() {
        let envelope = envelope();

        let json = Formatter::new(CliFormat::Json, false).format_envelope(&envelope).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["contract_version"], "1.0.0");

        let table = Formatter::new(CliFormat::Table, false).format_envelope(&envelope).unwrap();
        assert!(table.contains("engagement=0.600"));
        assert!(table.contains("f_time"));

        let quiet = Formatter::new(CliFormat::Quiet, false).format_envelope(&envelope).unwrap();
        assert_eq!(quiet, "0.42");
    }

    #[test]
    fn test_lint_lines() {
        let formatter = Formatter::new(CliFormat::Table, false);
        let path = PathBuf::from("profiles/a.yaml");
        assert_eq!(formatter.lint_line(&path, None), "OK   profiles/a.yaml");
        assert_eq!(
            formatter.lint_line(&path, Some("weights: field required")),
            "FAIL profiles/a.yaml: weights: field required"
        );
        assert_eq!(formatter.lint_summary(3, 1), "Checked 3 profile file(s), failures: 1");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(CliFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("test"), "✗ test");
    }
}
