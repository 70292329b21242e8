//! Per-call diagnostic collection.

use xmlfmt_report::Diagnostic;

/// Collects the diagnostics of one formatting call.
///
/// With the `Warn` policy, [`format_with_context`] fills this with every
/// diagnostic found while the best-effort output is still produced. With
/// `Fail` it holds the single aborting diagnostic; with `Ignore` it stays
/// empty.
///
/// [`format_with_context`]: crate::XmlDocumentFormatter::format_with_context
///
/// # Example
///
/// ```rust
/// use xmlfmt::{FormatContext, FormattingPreferences, XmlDocumentFormatter};
///
/// let formatter = XmlDocumentFormatter::new("\n", FormattingPreferences::default());
/// let mut ctx = FormatContext::new();
/// let out = formatter.format_with_context("<a><b></a>", &mut ctx).unwrap();
/// assert!(!out.is_empty());
/// assert!(ctx.has_diagnostics());
/// ```
#[derive(Debug, Default)]
pub struct FormatContext {
    diagnostics: Vec<Diagnostic>,
}

impl FormatContext {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    /// Add a diagnostic to the context.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Whether any diagnostics have been collected.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// All collected diagnostics, in document order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take all collected diagnostics, leaving the context empty.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Whether any error-kind diagnostics (not advisories) were collected.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}
