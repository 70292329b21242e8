//! Formatting preferences.

use crate::error::FormatError;
use serde::{Deserialize, Serialize};

/// What to do with well-formedness diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WellFormedValidation {
    /// The first diagnostic aborts the call with
    /// [`FormatError::InvalidDocument`]; no partial output is returned.
    Fail,
    /// Diagnostics are logged and collected, formatting continues on the
    /// best-effort token stream.
    #[default]
    Warn,
    /// Diagnostics are discarded entirely.
    Ignore,
}

/// Formatting options, immutable once handed to a formatter call.
///
/// One value may be shared across calls and across formatter instances.
/// Field names serialize in the camelCase form embedders use in their
/// configuration files (`deleteBlankLines`, `splitMultiAttrs`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormattingPreferences {
    /// Suppress whitespace-only lines between sibling elements.
    pub delete_blank_lines: bool,

    /// Render each attribute of a multi-attribute tag on its own line.
    pub split_multi_attrs: bool,

    /// Wrap tag lines exceeding [`max_line_width`](Self::max_line_width)
    /// at attribute boundaries.
    pub wrap_long_lines: bool,

    /// Policy for malformed input.
    pub well_formed_validation: WellFormedValidation,

    /// Width of one indentation level, in spaces. Also the visual width
    /// assumed for a tab when measuring lines for wrapping.
    pub indent_width: usize,

    /// Indent with tab characters instead of spaces.
    pub use_tabs: bool,

    /// Column threshold for [`wrap_long_lines`](Self::wrap_long_lines).
    pub max_line_width: usize,
}

impl Default for FormattingPreferences {
    fn default() -> Self {
        Self {
            delete_blank_lines: false,
            split_multi_attrs: false,
            wrap_long_lines: true,
            well_formed_validation: WellFormedValidation::default(),
            indent_width: 4,
            use_tabs: false,
            max_line_width: 80,
        }
    }
}

impl FormattingPreferences {
    /// The string for one indentation level.
    pub fn indent_unit(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.indent_width)
        }
    }

    /// The indent prefix for a nesting depth.
    pub fn indent_for(&self, depth: usize) -> String {
        self.indent_unit().repeat(depth)
    }

    /// Check preconditions. Violations fail every `format` call
    /// immediately, regardless of the validation policy.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.wrap_long_lines && self.max_line_width == 0 {
            return Err(FormatError::InvalidPreferences(
                "maxLineWidth must be nonzero when wrapLongLines is enabled".to_string(),
            ));
        }
        if !self.use_tabs && self.indent_width == 0 {
            return Err(FormatError::InvalidPreferences(
                "indentWidth must be nonzero when indenting with spaces".to_string(),
            ));
        }
        Ok(())
    }
}
