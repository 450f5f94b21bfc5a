//! # Global runtime configuration.
//!
//! Provides [`Config`], the settings the runtime consults during shutdown.
//!
//! ## Field semantics
//! - `grace`: maximum wait for forwarder tasks to exit after cancellation.
//!   Forwarders that select on their cancellation token exit promptly; the
//!   grace only matters for sources that block the executor inside `next`.

use std::time::Duration;

/// Configuration for the runtime.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum time to wait for forwarder tasks during shutdown.
    ///
    /// When the loop exits:
    /// - every running forwarder is cancelled via its `CancellationToken`;
    /// - the runtime waits up to `grace` for their join handles;
    /// - on timeout, `run()` returns `RuntimeError::GraceExceeded` listing
    ///   the subscription ids that did not exit.
    pub grace: Duration,
}

impl Default for Config {
    /// Default configuration: `grace = 5s`, enough for any forwarder that
    /// honors cancellation while still bounding a stuck blocking source.
    fn default() -> Self {
        Self {
            grace: Duration::from_secs(5),
        }
    }
}
