//! # Runtime: the serialized message loop and its public surface.
//!
//! The [`Runtime`] composes the mailbox, the effect [`Executor`], the
//! subscription [`Registry`], and the observer set, and owns the one task
//! that may mutate the model.
//!
//! ## Message flow
//! ```text
//! init() ─► (model₀, effect₀)
//!    │         seed: publish model₀ → sync subscriptions → notify → launch effect₀
//!    ▼
//! loop {
//!   select! {
//!     stop cancelled → break
//!     Inbound::Message(msg) →
//!         update(model, msg) ─► (model', effect)
//!         1. swap in model' (watch publish)
//!         2. re-diff subscriptions against model'
//!         3. notify observers in registration order
//!         4. launch effect (detached)
//!     Inbound::SourceDone(id, epoch) → registry cleanup only
//!   }
//! }
//! drain buffered inbound items (stop() never discards in-flight work)
//! registry shutdown under grace
//! ```
//!
//! ## Rules
//! - No two `update` calls ever run concurrently; processing one message up
//!   to its effect launch is linearized against all other messages.
//! - The loop exclusively owns model and registry; everything else reads
//!   watch snapshots or enqueues messages.
//! - The swap → re-diff → notify → launch order is part of the contract;
//!   any other ordering is a bug.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::effects::Effect;
use crate::error::RuntimeError;
use crate::observers::{Observe, ObserverSet};
use crate::program::Program;
use crate::subscriptions::SubscriptionId;

use super::active::ActiveIds;
use super::builder::RuntimeBuilder;
use super::config::Config;
use super::executor::Executor;
use super::mailbox::{Inbound, Mailbox};
use super::registry::Registry;

pub(crate) const CREATED: u8 = 0;
pub(crate) const RUNNING: u8 = 1;
pub(crate) const STOPPED: u8 = 2;

/// State shared between the loop, [`Runtime`], and every [`Handle`].
pub(crate) struct Shared<P: Program> {
    pub(crate) program: P,
    pub(crate) cfg: Config,
    pub(crate) mailbox: Mailbox<P::Message>,
    pub(crate) lifecycle: AtomicU8,
    pub(crate) stop: CancellationToken,
    pub(crate) model_tx: watch::Sender<Option<Arc<P::Model>>>,
    pub(crate) active: Arc<ActiveIds>,
    pub(crate) observers: Mutex<ObserverSet<P>>,
}

impl<P: Program> Shared<P> {
    fn send(&self, message: P::Message) {
        // Silent no-op once stopped; buffered messages are still drained.
        if self.lifecycle.load(Ordering::Acquire) == STOPPED {
            return;
        }
        let _ = self.mailbox.deliver(message);
    }

    fn stop(&self) {
        self.lifecycle.store(STOPPED, Ordering::Release);
        self.stop.cancel();
    }

    fn observe(&self, observer: impl Observe<P>) {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(observer));
    }

    fn notify(&self, model: &P::Model, effect: &Effect<P::Message>) {
        let snapshot = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot();
        ObserverSet::emit(&snapshot, model, effect);
    }

    fn current_model(&self) -> Option<Arc<P::Model>> {
        self.model_tx.borrow().clone()
    }
}

/// The runtime orchestrator.
///
/// Create with [`Runtime::new`] or [`Runtime::builder`], drive with
/// [`Runtime::run`], and interact through a clone-able [`Handle`].
pub struct Runtime<P: Program> {
    shared: Arc<Shared<P>>,
    inbound: Mutex<Option<mpsc::UnboundedReceiver<Inbound<P::Message>>>>,
}

impl<P: Program> Runtime<P> {
    /// Creates a runtime with default configuration and no observers.
    pub fn new(program: P) -> Self {
        Self::builder(program).build()
    }

    /// Returns a builder for configuration and observer registration.
    pub fn builder(program: P) -> RuntimeBuilder<P> {
        RuntimeBuilder::new(program)
    }

    pub(crate) fn from_parts(
        shared: Arc<Shared<P>>,
        inbound: mpsc::UnboundedReceiver<Inbound<P::Message>>,
    ) -> Self {
        Self {
            shared,
            inbound: Mutex::new(Some(inbound)),
        }
    }

    /// Returns a clone-able handle for use from other tasks.
    pub fn handle(&self) -> Handle<P> {
        Handle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Seeds the program and drives the message loop until stopped.
    ///
    /// Resolves once `stop()` has been requested and every message buffered
    /// at that moment has been applied. May be called at most once.
    pub async fn run(&self) -> Result<(), RuntimeError> {
        match self.shared.lifecycle.compare_exchange(
            CREATED,
            RUNNING,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {}
            Err(STOPPED) => return Err(RuntimeError::AlreadyStopped),
            Err(_) => return Err(RuntimeError::AlreadyStarted),
        }
        let mut inbound = self
            .inbound
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(RuntimeError::AlreadyStarted)?;

        let shared = &self.shared;
        let executor = Executor::new(shared.mailbox.clone());
        let mut registry = Registry::new(
            shared.mailbox.clone(),
            shared.stop.child_token(),
            Arc::clone(&shared.active),
            shared.cfg.grace,
        );

        // Seed: the initial transition is observed like any other.
        let (model0, effect0) = shared.program.init();
        let mut model = Arc::new(model0);
        shared.model_tx.send_replace(Some(Arc::clone(&model)));
        registry.sync(shared.program.subscriptions(&model));
        shared.notify(&model, &effect0);
        executor.launch(effect0);

        loop {
            tokio::select! {
                _ = shared.stop.cancelled() => break,
                next = inbound.recv() => match next {
                    Some(item) => self.apply(item, &mut model, &mut registry, &executor),
                    None => break,
                }
            }
        }

        // stop() requests termination; it does not discard in-flight work.
        while let Ok(item) = inbound.try_recv() {
            self.apply(item, &mut model, &mut registry, &executor);
        }

        shared.lifecycle.store(STOPPED, Ordering::Release);
        registry.shutdown().await
    }

    fn apply(
        &self,
        item: Inbound<P::Message>,
        model: &mut Arc<P::Model>,
        registry: &mut Registry<P::Message>,
        executor: &Executor<P::Message>,
    ) {
        let shared = &self.shared;
        match item {
            Inbound::Message(message) => {
                let (next, effect) = shared.program.update(model, message);
                *model = Arc::new(next);
                shared.model_tx.send_replace(Some(Arc::clone(model)));
                registry.sync(shared.program.subscriptions(model));
                shared.notify(model, &effect);
                executor.launch(effect);
            }
            Inbound::SourceDone(id, epoch) => registry.complete(&id, epoch),
        }
    }

    /// Enqueues an external message. Silent no-op once stopped.
    pub fn send(&self, message: P::Message) {
        self.shared.send(message);
    }

    /// Requests termination: later sends are dropped, buffered messages are
    /// still applied, forwarders are cancelled. Idempotent.
    pub fn stop(&self) {
        self.shared.stop();
    }

    /// Registers an observer. Register before `run()` to reliably observe
    /// the initial transition.
    pub fn observe(&self, observer: impl Observe<P>) {
        self.shared.observe(observer);
    }

    /// Latest applied model, or `None` before the seed.
    pub fn current_model(&self) -> Option<Arc<P::Model>> {
        self.shared.current_model()
    }

    /// Watch feed of model snapshots, for non-blocking external readers.
    pub fn watch_model(&self) -> watch::Receiver<Option<Arc<P::Model>>> {
        self.shared.model_tx.subscribe()
    }

    /// Point-in-time registry membership for `id`.
    pub fn is_subscribed(&self, id: &SubscriptionId) -> bool {
        self.shared.active.contains(id)
    }

    /// Sorted point-in-time list of active subscription ids.
    pub fn active_subscriptions(&self) -> Vec<SubscriptionId> {
        self.shared.active.snapshot()
    }
}

/// Clone-able handle to a running (or not yet running) [`Runtime`].
///
/// The handle a UI bridge or any other external collaborator holds: it can
/// inject messages, request termination, and read model snapshots, but it
/// can never mutate the model or registry directly.
pub struct Handle<P: Program> {
    shared: Arc<Shared<P>>,
}

impl<P: Program> Clone for Handle<P> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<P: Program> Handle<P> {
    /// Enqueues an external message. Silent no-op once stopped.
    pub fn send(&self, message: P::Message) {
        self.shared.send(message);
    }

    /// Requests termination. Idempotent.
    pub fn stop(&self) {
        self.shared.stop();
    }

    /// Registers an observer for subsequent transitions.
    pub fn observe(&self, observer: impl Observe<P>) {
        self.shared.observe(observer);
    }

    /// Latest applied model, or `None` before the seed.
    pub fn current_model(&self) -> Option<Arc<P::Model>> {
        self.shared.current_model()
    }

    /// Watch feed of model snapshots, for non-blocking external readers.
    pub fn watch_model(&self) -> watch::Receiver<Option<Arc<P::Model>>> {
        self.shared.model_tx.subscribe()
    }

    /// Point-in-time registry membership for `id`.
    pub fn is_subscribed(&self, id: &SubscriptionId) -> bool {
        self.shared.active.contains(id)
    }

    /// Sorted point-in-time list of active subscription ids.
    pub fn active_subscriptions(&self) -> Vec<SubscriptionId> {
        self.shared.active.snapshot()
    }
}
