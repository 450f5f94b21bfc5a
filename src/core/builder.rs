//! Builder for constructing a [`Runtime`] with configuration and observers.

use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use crate::observers::{Observe, ObserverRef, ObserverSet};
use crate::program::Program;

use super::active::ActiveIds;
use super::config::Config;
use super::mailbox::mailbox;
use super::runtime::{Runtime, Shared};

/// Builder for a [`Runtime`].
///
/// Observers registered here are guaranteed to see the initial transition;
/// observers registered after `run()` only see later ones.
pub struct RuntimeBuilder<P: Program> {
    program: P,
    cfg: Config,
    observers: Vec<ObserverRef<P>>,
}

impl<P: Program> RuntimeBuilder<P> {
    /// Creates a builder around the given program.
    pub fn new(program: P) -> Self {
        Self {
            program,
            cfg: Config::default(),
            observers: Vec::new(),
        }
    }

    /// Overrides the default configuration.
    #[must_use]
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Replaces the observer list.
    #[must_use]
    pub fn with_observers(mut self, observers: Vec<ObserverRef<P>>) -> Self {
        self.observers = observers;
        self
    }

    /// Appends one observer.
    #[must_use]
    pub fn observe(mut self, observer: impl Observe<P>) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Builds the runtime and wires its internals.
    pub fn build(self) -> Runtime<P> {
        let (mbox, inbound) = mailbox();
        let (model_tx, _model_rx) = tokio::sync::watch::channel(None);

        let shared = Arc::new(Shared {
            program: self.program,
            cfg: self.cfg,
            mailbox: mbox,
            lifecycle: std::sync::atomic::AtomicU8::new(super::runtime::CREATED),
            stop: CancellationToken::new(),
            model_tx,
            active: Arc::new(ActiveIds::new()),
            observers: Mutex::new(ObserverSet::new(self.observers)),
        });

        Runtime::from_parts(shared, inbound)
    }
}
