//! Error types for the formatting entry point.

use xmlfmt_report::Diagnostic;

/// Result type alias for xmlfmt operations.
pub type Result<T> = std::result::Result<T, FormatError>;

/// Failures a `format` call can report.
///
/// Malformed input only surfaces here under the `Fail` validation policy;
/// under `Warn` and `Ignore` it is recovered locally and never propagates.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FormatError {
    /// The input is not well-formed and the policy is `Fail`. Carries the
    /// first diagnostic encountered, with its position.
    #[error("invalid XML document: {0}")]
    InvalidDocument(Diagnostic),

    /// Preferences violate a precondition. Raised under every policy.
    #[error("invalid formatting preferences: {0}")]
    InvalidPreferences(String),
}

impl FormatError {
    /// The diagnostic behind an `InvalidDocument` error.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            FormatError::InvalidDocument(diagnostic) => Some(diagnostic),
            FormatError::InvalidPreferences(_) => None,
        }
    }
}
