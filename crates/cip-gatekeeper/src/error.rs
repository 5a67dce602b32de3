//! Gatekeeper error types

use thiserror::Error;

/// One contract violation, qualified by the dotted path of the offending field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path, e.g. `interaction_rules.min_value` or `weights.2`
    pub path: String,
    /// What is wrong with the value
    pub message: String,
}

impl FieldError {
    /// Create a field error
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every contract violation found in a payload, in detection order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    pub(crate) fn single(path: &str, message: &str) -> Self {
        Self(vec![FieldError::new(path, message)])
    }

    /// The individual violations
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Violations rendered as `path: message` strings
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no violations
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors produced when validating a profile document
#[derive(Error, Debug)]
pub enum ProfileDocumentError {
    /// The text is not a parseable YAML document
    #[error("yaml: {0}")]
    Syntax(String),

    /// The document parsed but violates the contract
    #[error(transparent)]
    Contract(#[from] ValidationErrors),

    /// The document could not be read
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl ProfileDocumentError {
    /// All messages, one per violation (a single entry for syntax and io errors)
    pub fn messages(&self) -> Vec<String> {
        match self {
            ProfileDocumentError::Syntax(_) | ProfileDocumentError::Io(_) => {
                vec![self.to_string()]
            }
            ProfileDocumentError::Contract(errors) => errors.messages(),
        }
    }
}
