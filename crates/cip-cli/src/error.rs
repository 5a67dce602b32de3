//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SDK error (settings, registry, detection)
    #[error("{0}")]
    Sdk(#[from] cip_sdk::SdkError),

    /// Registry error
    #[error("{0}")]
    Registry(#[from] cip_registry::RegistryError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// One or more profile documents failed validation
    #[error("{failures} of {checked} profile file(s) failed validation")]
    LintFailed {
        /// Files that failed
        failures: usize,
        /// Files checked
        checked: usize,
    },
}

impl CliError {
    /// Process exit code for this error
    ///
    /// Usage problems exit with 2; everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidInput(_) | CliError::Config(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::InvalidInput("missing dir".into()).exit_code(), 2);
        assert_eq!(
            CliError::LintFailed {
                failures: 1,
                checked: 3
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_lint_failed_message() {
        let err = CliError::LintFailed {
            failures: 2,
            checked: 5,
        };
        assert_eq!(err.to_string(), "2 of 5 profile file(s) failed validation");
    }
}
