//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use cip_registry::{load_profile_file, profile_paths, RegistryError};
use std::path::{Path, PathBuf};

/// Outcome of linting a profile directory
#[derive(Debug, Default)]
pub struct LintReport {
    /// Each file checked, with its failure if any
    pub entries: Vec<(PathBuf, Option<String>)>,
}

impl LintReport {
    /// Files checked
    pub fn checked(&self) -> usize {
        self.entries.len()
    }

    /// Files that failed
    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|(_, error)| error.is_some()).count()
    }
}

/// Validate every profile document under `dir`
///
/// A missing directory is a usage error; invalid documents are recorded in
/// the report rather than returned.
pub fn lint_directory(dir: &Path) -> Result<LintReport> {
    if !dir.is_dir() {
        return Err(CliError::InvalidInput(format!(
            "profile directory not found: {}",
            dir.display()
        )));
    }

    let mut report = LintReport::default();
    for path in profile_paths(dir)? {
        let error = match load_profile_file(&path) {
            Ok(_) => None,
            Err(RegistryError::Load { source, .. }) => Some(source.messages().join("; ")),
            Err(e) => Some(e.to_string()),
        };
        report.entries.push((path, error));
    }

    Ok(report)
}

/// Execute the validate command.
pub fn execute_validate(args: ValidateArgs, formatter: &Formatter) -> Result<()> {
    let report = lint_directory(&args.dir)?;

    for (path, error) in &report.entries {
        println!("{}", formatter.lint_line(path, error.as_deref()));
    }
    println!("{}", formatter.lint_summary(report.checked(), report.failures()));

    match report.failures() {
        0 => Ok(()),
        failures => Err(CliError::LintFailed {
            failures,
            checked: report.checked(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VALID: &str = r#"
domain_name: signal_core
layer_names: [alpha, beta, gamma]
weights: [0.5, 0.3, 0.2]
hierarchy: {alpha: Micro, beta: Meso, gamma: Macro}
"#;

    #[test]
    fn test_lint_mixed_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a_good.yaml"), VALID).unwrap();
        fs::write(
            dir.path().join("b_bad.yaml"),
            VALID.replace("[0.5, 0.3, 0.2]", "[0.5, 0.5, 0.5]"),
        )
        .unwrap();
        fs::write(dir.path().join("_draft.yaml"), "not: [valid").unwrap();

        let report = lint_directory(dir.path()).unwrap();
        assert_eq!(report.checked(), 2);
        assert_eq!(report.failures(), 1);

        let (path, error) = &report.entries[1];
        assert!(path.ends_with("b_bad.yaml"));
        assert!(error.as_deref().unwrap().contains("weights must sum to 1.0"));
    }

    #[test]
    fn test_lint_missing_directory_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = lint_directory(&dir.path().join("absent")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_lint_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let report = lint_directory(dir.path()).unwrap();
        assert_eq!(report.checked(), 0);
        assert_eq!(report.failures(), 0);
    }
}
