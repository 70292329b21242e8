//! Well-formedness diagnostic values.

use crate::location::Location;
use serde::{Deserialize, Serialize};

/// The kind of diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A well-formedness violation (unbalanced tags, bad markup syntax).
    Error,
    /// A structural advisory (no root element, content outside the root).
    Warning,
}

/// A single well-formedness finding, tagged with a position and a
/// human-readable description.
///
/// A diagnostic by itself carries no policy: the consumer decides whether
/// it aborts processing, is collected for later reporting, or is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Whether this is a violation or an advisory.
    pub kind: DiagnosticKind,

    /// Brief description of the finding.
    pub message: String,

    /// Position in the source text, when one is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    /// Additional context lines (expected/found tag names and the like).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub details: Vec<String>,
}

impl Diagnostic {
    /// Start building an error-kind diagnostic.
    pub fn error(message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::new(DiagnosticKind::Error, message)
    }

    /// Start building a warning-kind diagnostic.
    pub fn warning(message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::new(DiagnosticKind::Warning, message)
    }

    /// Whether this diagnostic is an error rather than an advisory.
    pub fn is_error(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(location) = &self.location {
            write!(f, " ({})", location)?;
        }
        Ok(())
    }
}

/// Builder for [`Diagnostic`].
#[derive(Debug)]
pub struct DiagnosticBuilder {
    diagnostic: Diagnostic,
}

impl DiagnosticBuilder {
    fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            diagnostic: Diagnostic {
                kind,
                message: message.into(),
                location: None,
                details: Vec::new(),
            },
        }
    }

    /// Attach a source location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.diagnostic.location = Some(location);
        self
    }

    /// Attach a source location when one is available.
    pub fn at(mut self, location: Option<Location>) -> Self {
        self.diagnostic.location = location;
        self
    }

    /// Add a context line.
    pub fn add_detail(mut self, detail: impl Into<String>) -> Self {
        self.diagnostic.details.push(detail.into());
        self
    }

    /// Finish building.
    pub fn build(self) -> Diagnostic {
        self.diagnostic
    }
}
