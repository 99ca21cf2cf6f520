//! Error types for pgforge

use thiserror::Error;

/// Result type alias for pgforge operations
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Error types for statement construction and transaction execution
#[derive(Debug, Error)]
pub enum ForgeError {
    /// Builder-time validation failure.
    ///
    /// The message is the complete, aggregated report: a fixed preamble
    /// followed by every violated rule on its own line, in check order.
    #[error("{0}")]
    Validation(String),

    /// Parallel collections differ in length (e.g. statement labels vs.
    /// statements).
    #[error("Argument mismatch: {0}")]
    ArgumentMismatch(String),

    /// A result set did not have the shape a converter expected.
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Database connection error (open, commit, or close)
    #[error("Connection error: {0}")]
    Connection(String),

    /// A single statement failed against the connection.
    ///
    /// This is the only recoverable kind: the transaction engine may retry
    /// the unit after logging it.
    #[error("Statement execution failed: {0}")]
    Statement(String),

    /// A transaction unit kept failing until the attempt budget ran out.
    #[error("Transaction '{name}' gave up after {attempts} attempts")]
    TransactionExhausted { name: String, attempts: u32 },
}

impl ForgeError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an argument-mismatch error
    pub fn argument_mismatch(message: impl Into<String>) -> Self {
        Self::ArgumentMismatch(message.into())
    }

    /// Create a conversion error
    pub fn conversion(message: impl Into<String>) -> Self {
        Self::Conversion(message.into())
    }

    /// Create a connection error from any displayable cause
    pub fn connection(cause: impl std::fmt::Display) -> Self {
        Self::Connection(cause.to_string())
    }

    /// Create a statement-execution error from any displayable cause
    pub fn statement(cause: impl std::fmt::Display) -> Self {
        Self::Statement(cause.to_string())
    }

    /// Whether the transaction engine may retry after this error.
    ///
    /// Validation, argument-mismatch and conversion errors indicate a caller
    /// bug and always surface immediately.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Statement(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an exhausted-retries error
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::TransactionExhausted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_errors_are_recoverable() {
        assert!(ForgeError::statement("deadlock detected").is_recoverable());
    }

    #[test]
    fn caller_bugs_are_not_recoverable() {
        assert!(!ForgeError::validation("missing field").is_recoverable());
        assert!(!ForgeError::argument_mismatch("2 names, 1 statement").is_recoverable());
        assert!(!ForgeError::conversion("expected one row").is_recoverable());
        assert!(
            !ForgeError::TransactionExhausted {
                name: "load".to_string(),
                attempts: 3,
            }
            .is_recoverable()
        );
    }

    #[test]
    fn exhausted_display_names_the_unit() {
        let err = ForgeError::TransactionExhausted {
            name: "nightly-sync".to_string(),
            attempts: 3,
        };
        assert_eq!(
            err.to_string(),
            "Transaction 'nightly-sync' gave up after 3 attempts"
        );
    }
}
