//! Shared build-time validation for statement builders.
//!
//! Builders never fail fast: every violated rule is collected and reported in
//! one aggregated error so callers see the complete set at once.

use crate::error::{ForgeError, ForgeResult};

/// Fixed preamble of every aggregated validation report.
pub(crate) const PREAMBLE: &str = "Encountered the following errors trying to build a ";

/// Collects violated rules in check order.
#[derive(Debug, Default)]
pub(crate) struct RuleCheck {
    errors: Vec<String>,
}

impl RuleCheck {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `message` if `ok` does not hold.
    pub(crate) fn expect(&mut self, ok: bool, message: impl Into<String>) {
        if !ok {
            self.errors.push(message.into());
        }
    }

    /// Finish the pass: `Ok(())` when nothing was violated, otherwise one
    /// `Validation` error listing every message on its own line.
    pub(crate) fn finish(self, type_name: &str) -> ForgeResult<()> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let mut report = String::with_capacity(
            PREAMBLE.len() + type_name.len() + 1 + self.errors.iter().map(|e| e.len() + 1).sum::<usize>(),
        );
        report.push_str(PREAMBLE);
        report.push_str(type_name);
        report.push(':');
        for error in &self.errors {
            report.push('\n');
            report.push_str(error);
        }
        Err(ForgeError::validation(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_pass_is_ok() {
        let mut check = RuleCheck::new();
        check.expect(true, "unused");
        assert!(check.finish("SelectStatement").is_ok());
    }

    #[test]
    fn violations_aggregate_in_check_order() {
        let mut check = RuleCheck::new();
        check.expect(false, "first rule");
        check.expect(true, "never reported");
        check.expect(false, "second rule");
        let err = check.finish("InsertStatement").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Encountered the following errors trying to build a InsertStatement:\n\
             first rule\n\
             second rule"
        );
    }
}
