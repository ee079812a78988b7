//! Validator contract shared by every file format

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Classification of a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    /// The reason is advisory text for logs only
    Invalid { reason: String },
    /// The validator could not judge the file (resource limit, unsupported
    /// codec feature). Never grounds for deletion.
    Inconclusive { reason: String },
}

impl ValidationOutcome {
    pub fn invalid(reason: impl Into<String>) -> Self {
        ValidationOutcome::Invalid {
            reason: reason.into(),
        }
    }

    pub fn inconclusive(reason: impl Into<String>) -> Self {
        ValidationOutcome::Inconclusive {
            reason: reason.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationOutcome::Valid => write!(f, "valid"),
            ValidationOutcome::Invalid { reason } => write!(f, "invalid ({})", reason),
            ValidationOutcome::Inconclusive { reason } => write!(f, "inconclusive ({})", reason),
        }
    }
}

/// Conditions that make a validator unable to judge any file at all.
///
/// A corrupt file is never an error; it is a [`ValidationOutcome::Invalid`].
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("external tool `{tool}` could not be launched: {source}")]
    ToolUnavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },
}

/// A format-specific structural check.
///
/// Implementations must be read-only: deleting files is the remediator's job.
pub trait Validator: Send + Sync {
    /// Short label used in log lines, e.g. "PDF" or "image"
    fn kind(&self) -> &'static str;

    /// Classify the file at `path`
    fn validate(&self, path: &Path) -> Result<ValidationOutcome, ValidatorError>;

    /// Check that the validator can run at all before the scan starts
    fn preflight(&self) -> Result<(), ValidatorError> {
        Ok(())
    }
}
