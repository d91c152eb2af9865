use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur at the boundaries of the engine (file output,
/// serialization, argument parsing). Aggregation itself never fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MomsError {
    /// Input could not be interpreted at all.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Text could not be represented in the target character set.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Writing an export file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Severity of a [`Finding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Marks the report invalid.
    Error,
    /// Surfaced to the caller, never affects validity.
    Warning,
    /// Informational only.
    Info,
}

impl Severity {
    /// Lowercase label as used in the external report.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding with subject field, message and severity.
///
/// Findings are collected into lists, never raised. A report with at least
/// one [`Severity::Error`] finding is invalid but still fully populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Subject of the finding (e.g. "organisation_number", "transaction_tx_3").
    pub field: String,
    /// Human-readable description.
    pub message: String,
    /// How the finding affects report validity.
    pub severity: Severity,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.field, self.message)
    }
}

impl Finding {
    /// Create a finding with an explicit severity.
    pub fn new(field: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity,
        }
    }

    /// Create an error finding.
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, Severity::Error)
    }

    /// Create a warning finding.
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, Severity::Warning)
    }

    /// Create an informational finding.
    pub fn info(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, Severity::Info)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
