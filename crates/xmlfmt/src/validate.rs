//! Well-formedness policy gate.

use crate::error::FormatError;
use crate::prefs::WellFormedValidation;
use xmlfmt_report::Diagnostic;

/// Routes diagnostics according to the configured policy.
///
/// Every place that detects a well-formedness problem reports through
/// here with `?`, so under the `Fail` policy the first diagnostic aborts
/// the whole call before any output escapes.
pub(crate) struct Validator<'a> {
    policy: WellFormedValidation,
    collected: &'a mut Vec<Diagnostic>,
}

impl<'a> Validator<'a> {
    pub fn new(policy: WellFormedValidation, collected: &'a mut Vec<Diagnostic>) -> Self {
        Self { policy, collected }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) -> Result<(), FormatError> {
        match self.policy {
            WellFormedValidation::Fail => Err(FormatError::InvalidDocument(diagnostic)),
            WellFormedValidation::Warn => {
                tracing::warn!(diagnostic = %diagnostic, "malformed XML input");
                self.collected.push(diagnostic);
                Ok(())
            }
            WellFormedValidation::Ignore => Ok(()),
        }
    }
}
