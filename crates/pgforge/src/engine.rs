//! The retrying transaction executor.
//!
//! One [`Executor::execute_transaction`] call drives one unit of work through
//! up to [`MAX_ATTEMPTS`] attempts. Every attempt runs on a fresh connection
//! opened with auto-commit disabled; a recoverable failure is logged, rolled
//! back and retried, and the connection is released on every exit path.
//! Validation, argument-mismatch and conversion errors surface immediately:
//! they indicate a caller bug, not a transient fault.

use crate::client::{Connection, ConnectionProvider};
use crate::error::{ForgeError, ForgeResult};
use crate::log::{Logger, StderrLogger};
use crate::txn::SqlTransaction;

/// Attempt budget for one transaction execution.
pub const MAX_ATTEMPTS: u32 = 3;

/// Executes transaction units against connections from a provider.
pub struct Executor<P, L = StderrLogger> {
    provider: P,
    logger: L,
    max_attempts: u32,
}

impl<P: ConnectionProvider> Executor<P> {
    /// Create an executor logging to stderr.
    pub fn new(provider: P) -> Self {
        Self::with_logger(provider, StderrLogger::default())
    }
}

impl<P: ConnectionProvider, L: Logger> Executor<P, L> {
    /// Create an executor with an explicit logger.
    pub fn with_logger(provider: P, logger: L) -> Self {
        Self {
            provider,
            logger,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    /// Override the attempt budget (clamped to at least one).
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Run a unit of work, retrying recoverable failures.
    ///
    /// On success the attempt is committed, the connection released, one
    /// success event logged, and the unit's result returned. A recoverable
    /// failure is logged with the unit's name and cause, rolled back, and
    /// retried on a fresh connection until the budget is exhausted, at which
    /// point [`ForgeError::TransactionExhausted`] surfaces. Other errors
    /// surface immediately. No commit happens on any failure path.
    pub async fn execute_transaction<U>(&self, unit: &U) -> ForgeResult<U::Output>
    where
        U: SqlTransaction<P::Conn>,
    {
        for attempt in 1..=self.max_attempts {
            let mut conn = self.provider.open().await?;
            match unit.run(&mut conn, &self.logger).await {
                Ok(output) => match conn.commit().await {
                    Ok(()) => {
                        self.logger.info(&format!(
                            "transaction '{}' committed on attempt {attempt}",
                            unit.name()
                        ));
                        let _ = conn.close().await;
                        return Ok(output);
                    }
                    Err(err) => {
                        self.logger.error(
                            &format!("transaction '{}' failed to commit", unit.name()),
                            &err,
                        );
                        let _ = conn.close().await;
                        return Err(err);
                    }
                },
                Err(err) => {
                    self.logger.error(
                        &format!(
                            "transaction '{}' failed on attempt {attempt}",
                            unit.name()
                        ),
                        &err,
                    );
                    let _ = conn.rollback().await;
                    let _ = conn.close().await;
                    if !err.is_recoverable() {
                        return Err(err);
                    }
                }
            }
        }
        Err(ForgeError::TransactionExhausted {
            name: unit.name().to_string(),
            attempts: self.max_attempts,
        })
    }
}
