//! Diagnostic messages and source locations for xmlfmt.
//!
//! This crate is the leaf of the xmlfmt workspace: it defines the
//! [`Diagnostic`] value that the formatting engine attaches to
//! well-formedness findings, and the [`Location`] type used to point at a
//! position in the source text. Diagnostics are plain data, not errors:
//! the engine decides what to do with them based on its validation policy.
//!
//! # Example
//!
//! ```rust
//! use xmlfmt_report::{offset_to_location, Diagnostic};
//!
//! let source = "<root>\n  </wrong>";
//! let diagnostic = Diagnostic::error("mismatched end tag")
//!     .at(offset_to_location(source, 9))
//!     .add_detail("expected </root>")
//!     .build();
//!
//! assert_eq!(diagnostic.to_string(), "mismatched end tag (line 2, column 3)");
//! ```

pub mod diagnostic;
pub mod location;

// Re-export main types
pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticKind};
pub use location::{Location, offset_to_location};
