//! Formatting entry point.

use crate::context::FormatContext;
use crate::error::FormatError;
use crate::indent::IndentationEngine;
use crate::prefs::FormattingPreferences;
use crate::scanner::{ScanEvent, Scanner};
use crate::validate::Validator;
use xmlfmt_report::Diagnostic;

/// Formats XML document text with a fixed line separator and preferences.
///
/// The formatter owns only configuration; every call allocates its own
/// scanner, nesting stack, and buffers. Instances are therefore safe to
/// reuse, even right after a call on unbalanced input, and safe to share
/// across threads.
///
/// # Example
///
/// ```rust
/// use xmlfmt::{FormattingPreferences, XmlDocumentFormatter};
///
/// let formatter = XmlDocumentFormatter::new("\n", FormattingPreferences::default());
/// let out = formatter.format("<root>\n  <child/>\n</root>").unwrap();
/// assert_eq!(out, "<root>\n    <child/>\n</root>");
/// ```
#[derive(Debug, Clone)]
pub struct XmlDocumentFormatter {
    line_separator: String,
    preferences: FormattingPreferences,
}

impl XmlDocumentFormatter {
    pub fn new(line_separator: impl Into<String>, preferences: FormattingPreferences) -> Self {
        Self {
            line_separator: line_separator.into(),
            preferences,
        }
    }

    pub fn preferences(&self) -> &FormattingPreferences {
        &self.preferences
    }

    pub fn line_separator(&self) -> &str {
        &self.line_separator
    }

    /// Format one document.
    ///
    /// # Errors
    ///
    /// Fails with [`FormatError::InvalidDocument`] when the input is not
    /// well-formed and the validation policy is `Fail`, and with
    /// [`FormatError::InvalidPreferences`] when the preferences violate a
    /// precondition (under every policy).
    pub fn format(&self, source: &str) -> Result<String, FormatError> {
        let mut collected = Vec::new();
        self.format_inner(source, &mut collected)
    }

    /// Format one document, collecting diagnostics into `context`.
    ///
    /// Under the `Warn` policy this is how callers get the report for the
    /// best-effort output; under `Fail` the aborting diagnostic is also
    /// added to the context.
    pub fn format_with_context(
        &self,
        source: &str,
        context: &mut FormatContext,
    ) -> Result<String, FormatError> {
        let mut collected = Vec::new();
        let result = self.format_inner(source, &mut collected);
        for diagnostic in collected {
            context.add_diagnostic(diagnostic);
        }
        if let Err(FormatError::InvalidDocument(diagnostic)) = &result {
            context.add_diagnostic(diagnostic.clone());
        }
        result
    }

    fn format_inner(
        &self,
        source: &str,
        collected: &mut Vec<Diagnostic>,
    ) -> Result<String, FormatError> {
        self.preferences.validate()?;
        tracing::debug!(len = source.len(), "formatting XML document");

        let mut validator = Validator::new(self.preferences.well_formed_validation, collected);
        let mut engine = IndentationEngine::new(source, &self.preferences, &self.line_separator);

        for event in Scanner::new(source) {
            match event {
                ScanEvent::Token(token) => engine.handle(token, &mut validator)?,
                ScanEvent::Malformed(diagnostic) => validator.report(diagnostic)?,
            }
        }

        engine.finish(&mut validator)
    }
}

impl Default for XmlDocumentFormatter {
    fn default() -> Self {
        Self::new("\n", FormattingPreferences::default())
    }
}

/// Format `source` in one call.
///
/// Convenience wrapper over [`XmlDocumentFormatter`] for callers that
/// construct the preferences elsewhere and format one document at a time.
pub fn format(
    source: &str,
    preferences: &FormattingPreferences,
    line_separator: &str,
) -> Result<String, FormatError> {
    XmlDocumentFormatter::new(line_separator, preferences.clone()).format(source)
}
