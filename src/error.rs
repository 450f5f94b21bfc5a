//! Error types used by the tealoop runtime.
//!
//! The runtime deliberately has **no** error channel for effects or
//! subscription sources: a failed thunk contributes nothing to the mailbox,
//! and a failed source is indistinguishable from one that completed
//! naturally. Programs that need failure observability encode it as a
//! regular message.
//!
//! [`RuntimeError`] therefore only covers lifecycle misuse and shutdown
//! overruns, which indicate a violated contract rather than a runtime
//! condition.

use std::time::Duration;

use thiserror::Error;

use crate::subscriptions::SubscriptionId;

/// # Errors produced by the tealoop runtime.
///
/// Lifecycle misuse (`run` twice, `run` after `stop`) fails fast instead of
/// being silently recovered. `GraceExceeded` reports forwarder tasks that
/// outlived the configured shutdown grace.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// `run()` was called on a runtime that is already running.
    #[error("runtime already started; run() may be called at most once")]
    AlreadyStarted,

    /// `run()` was called on a runtime that was already stopped.
    #[error("runtime already stopped; a runtime cannot be restarted")]
    AlreadyStopped,

    /// Shutdown grace period was exceeded; some forwarders remained stuck.
    #[error("shutdown grace {grace:?} exceeded; stuck forwarders: {stuck:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Subscription ids whose forwarder tasks did not exit in time.
        stuck: Vec<SubscriptionId>,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use tealoop::RuntimeError;
    ///
    /// assert_eq!(RuntimeError::AlreadyStarted.as_label(), "runtime_already_started");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::AlreadyStarted => "runtime_already_started",
            RuntimeError::AlreadyStopped => "runtime_already_stopped",
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::AlreadyStarted => "run() called more than once".to_string(),
            RuntimeError::AlreadyStopped => "run() called after stop()".to_string(),
            RuntimeError::GraceExceeded { grace, stuck } => {
                format!("grace exceeded after {grace:?}; stuck forwarders={stuck:?}")
            }
        }
    }
}
