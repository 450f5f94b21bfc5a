//! # Effect executor: runs descriptors, feeds results back into the mailbox.
//!
//! The executor turns an [`Effect`] descriptor into work:
//!
//! ```text
//! launch(effect)                        (called by the message loop)
//!     └─► tokio::spawn(execute(effect))   — detached, never blocks the loop
//!
//! execute(None)        → return immediately
//! execute(Task(thunk)) → spawn thunk, await it, deliver its one message
//! execute(Batch[...])  → spawn execute() per child into a JoinSet,
//!                        return once ALL children have joined
//! ```
//!
//! ## Rules
//! - The executor never touches the model; it only enqueues messages.
//! - A thunk that panics joins as an error and contributes **nothing** —
//!   effect failure is invisible to the runtime by design of the contract.
//! - Batch children run in parallel and may deliver mid-flight in any
//!   interleaving; the enclosing `execute` still waits for the slowest.

use std::future::Future;
use std::pin::Pin;

use tokio::task::JoinSet;

use crate::effects::{Effect, Kind};

use super::mailbox::Mailbox;

/// Runs effect descriptors against the runtime's mailbox.
pub(crate) struct Executor<M: Send + 'static> {
    mailbox: Mailbox<M>,
}

impl<M: Send + 'static> Clone for Executor<M> {
    fn clone(&self) -> Self {
        Self {
            mailbox: self.mailbox.clone(),
        }
    }
}

impl<M: Send + 'static> Executor<M> {
    pub(crate) fn new(mailbox: Mailbox<M>) -> Self {
        Self { mailbox }
    }

    /// Starts executing `effect` without waiting for it.
    ///
    /// A stalled thunk stalls only its own task, never the message loop.
    pub(crate) fn launch(&self, effect: Effect<M>) {
        if effect.is_none() {
            return;
        }
        let executor = self.clone();
        tokio::spawn(executor.execute(effect));
    }

    /// Runs one descriptor to completion.
    ///
    /// Boxed because `Batch` recurses through `execute` for each child.
    fn execute(self, effect: Effect<M>) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin(async move {
            match effect.kind {
                Kind::None => {}
                Kind::Task(thunk) => {
                    // Spawned so a panicking thunk surfaces as a JoinError
                    // instead of unwinding through the batch tree.
                    if let Ok(message) = tokio::spawn(thunk).await {
                        let _ = self.mailbox.deliver(message);
                    }
                }
                Kind::Batch(children) => {
                    let mut set = JoinSet::new();
                    for child in children {
                        set.spawn(self.clone().execute(child));
                    }
                    while set.join_next().await.is_some() {}
                }
            }
        })
    }
}
