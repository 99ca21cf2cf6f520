//! Logging contract for the transaction engine.
//!
//! The engine and the transaction units report through [`Logger`]; sinks are
//! a collaborator concern. The default sink prints prefixed lines to stderr;
//! enable the `tracing` feature for a [`TracingLogger`] that emits `tracing`
//! events instead.

use crate::error::ForgeError;

/// Sink for engine and transaction-unit log events.
pub trait Logger: Send + Sync {
    /// Report normal progress.
    fn info(&self, message: &str);

    /// Report a failure together with its cause.
    fn error(&self, message: &str, cause: &ForgeError);
}

/// A logger that prints prefixed lines to stderr.
#[derive(Debug, Clone)]
pub struct StderrLogger {
    /// Prefix for log messages.
    pub prefix: String,
}

impl Default for StderrLogger {
    fn default() -> Self {
        Self {
            prefix: "[pgforge]".to_string(),
        }
    }
}

impl StderrLogger {
    /// Create a new stderr logger with the default prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prefix for log messages.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

impl Logger for StderrLogger {
    fn info(&self, message: &str) {
        eprintln!("{} {}", self.prefix, message);
    }

    fn error(&self, message: &str, cause: &ForgeError) {
        eprintln!("{} {} ({})", self.prefix, message, cause);
    }
}

impl<L: Logger + ?Sized> Logger for std::sync::Arc<L> {
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn error(&self, message: &str, cause: &ForgeError) {
        (**self).error(message, cause);
    }
}

/// A logger that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn info(&self, _message: &str) {}

    fn error(&self, _message: &str, _cause: &ForgeError) {}
}

/// A logger that emits `tracing` events with target `pgforge`.
///
/// Enable via the crate feature: `pgforge = { features = ["tracing"] }`.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

#[cfg(feature = "tracing")]
impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "pgforge", "{message}");
    }

    fn error(&self, message: &str, cause: &ForgeError) {
        tracing::error!(target: "pgforge", cause = %cause, "{message}");
    }
}
