//! Canonical, indentation-normalizing XML formatting.
//!
//! This crate reformats XML document text (text in, text out) according
//! to a small set of orthogonal preferences, without building a DOM and
//! without resolving external entities or DTDs. Line structure follows the
//! input (inline content stays inline), while indentation is normalized to
//! the configured unit per nesting level.
//!
//! The main types are:
//! - [`XmlDocumentFormatter`]: the entry point, configured with a line
//!   separator and [`FormattingPreferences`]
//! - [`FormattingPreferences`]: blank-line suppression, multi-attribute
//!   splitting, long-line wrapping, and the well-formedness policy
//! - [`FormatContext`]: collects per-call [`Diagnostic`]s for callers that
//!   want the best-effort report
//!
//! # Example
//!
//! ```rust
//! use xmlfmt::{format, FormattingPreferences};
//!
//! let out = format(
//!     "<project>\n  <target name=\"build\"/>\n</project>",
//!     &FormattingPreferences::default(),
//!     "\n",
//! )
//! .unwrap();
//! assert_eq!(out, "<project>\n    <target name=\"build\"/>\n</project>");
//! ```
//!
//! # Well-formedness
//!
//! The scanner and the indentation engine report diagnostics (unbalanced
//! or mismatched tags, malformed attributes, missing root element) which
//! the configured [`WellFormedValidation`] policy routes: `Fail` aborts
//! the call at the first one, `Warn` collects them while formatting
//! best-effort, `Ignore` discards them. A non-failing call is
//! deterministic: all mutable state is local to the call, so formatting
//! the same malformed input twice yields byte-identical output.

pub mod context;
pub mod error;
pub mod formatter;
pub mod prefs;
pub mod scanner;
pub mod token;

mod compose;
mod indent;
mod validate;

// Re-export main types
pub use context::FormatContext;
pub use error::{FormatError, Result};
pub use formatter::{XmlDocumentFormatter, format};
pub use prefs::{FormattingPreferences, WellFormedValidation};
pub use scanner::{ScanEvent, Scanner};
pub use token::{Attribute, Span, Tag, Token, TokenKind};
pub use xmlfmt_report::{Diagnostic, DiagnosticKind, Location};
