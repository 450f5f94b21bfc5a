//! # Subscription registry: id-keyed forwarder lifecycle.
//!
//! The registry owns the forwarder tasks (`JoinHandle` + per-id
//! `CancellationToken`) and makes the running set converge to the desired
//! set on every transition:
//!
//! ```text
//! sync(desired):
//!   only running  → cancel token, retire handle      (Running → Absent)
//!   only desired  → spawn forwarder, register        (Absent  → Running)
//!   in both       → no action, drop the new source   (identity wins)
//! complete(id, epoch): remove after natural completion (Running → Absent)
//! shutdown():      cancel all, await joins under grace
//! ```
//!
//! ## Rules
//! - Owned exclusively by the message loop; no shared mutation.
//! - No `Paused` state and no restart-in-place: an id removed and desired
//!   again later starts a fresh forwarder from the then-current source.
//! - Cancellation never blocks `sync`; retired handles are awaited only at
//!   shutdown, bounded by the configured grace.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::RuntimeError;
use crate::subscriptions::{SubscriptionId, Subscriptions};

use super::active::ActiveIds;
use super::forwarder::forward;
use super::mailbox::{Epoch, Mailbox};

/// Handle to one running forwarder.
struct Forwarder {
    /// Incarnation of the id; guards `complete` against stale notices.
    epoch: Epoch,
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

/// Registry of active subscriptions, keyed by [`SubscriptionId`].
pub(crate) struct Registry<M: Send + 'static> {
    running: HashMap<SubscriptionId, Forwarder>,
    /// Cancelled forwarders not yet known to have exited.
    retired: Vec<(SubscriptionId, JoinHandle<()>)>,
    mailbox: Mailbox<M>,
    /// Parent for per-forwarder child tokens; cancelled by `stop()`.
    parent: CancellationToken,
    mirror: Arc<ActiveIds>,
    grace: Duration,
    /// Last epoch handed out; incremented per spawned forwarder.
    epochs: Epoch,
}

impl<M: Send + 'static> Registry<M> {
    pub(crate) fn new(
        mailbox: Mailbox<M>,
        parent: CancellationToken,
        mirror: Arc<ActiveIds>,
        grace: Duration,
    ) -> Self {
        Self {
            running: HashMap::new(),
            retired: Vec::new(),
            mailbox,
            parent,
            mirror,
            grace,
            epochs: 0,
        }
    }

    /// Makes the running set converge to `desired`.
    ///
    /// An id present in both sets keeps its existing forwarder untouched,
    /// even if `desired` carries a structurally different source for it.
    pub(crate) fn sync(&mut self, desired: Subscriptions<M>) {
        let mut desired = desired.into_entries();

        let removed: Vec<SubscriptionId> = self
            .running
            .keys()
            .filter(|id| !desired.contains_key(*id))
            .cloned()
            .collect();
        for id in removed {
            if let Some(forwarder) = self.running.remove(&id) {
                forwarder.cancel.cancel();
                self.retired.push((id.clone(), forwarder.join));
            }
            self.mirror.remove(&id);
        }

        desired.retain(|id, _| !self.running.contains_key(id));
        for (id, source) in desired {
            self.epochs += 1;
            let epoch = self.epochs;
            let cancel = self.parent.child_token();
            let join = tokio::spawn(forward(
                id.clone(),
                epoch,
                source,
                self.mailbox.clone(),
                cancel.clone(),
            ));
            self.running
                .insert(id.clone(), Forwarder { epoch, cancel, join });
            self.mirror.insert(id);
        }

        self.retired.retain(|(_, join)| !join.is_finished());
    }

    /// Removes an id whose forwarder announced natural completion.
    ///
    /// The forwarder is already exiting on its own; no cancellation and no
    /// transition are involved. A notice whose epoch does not match the
    /// running entry is stale (the id was removed and desired again while
    /// the notice sat in the queue) and leaves the replacement untouched.
    pub(crate) fn complete(&mut self, id: &SubscriptionId, epoch: Epoch) {
        if self.running.get(id).is_some_and(|f| f.epoch == epoch) {
            self.running.remove(id);
            self.mirror.remove(id);
        }
    }

    /// Cancels everything and awaits forwarder exits under the grace.
    pub(crate) async fn shutdown(mut self) -> Result<(), RuntimeError> {
        let mut pending: Vec<(SubscriptionId, JoinHandle<()>)> = self.retired;
        for (id, forwarder) in self.running.drain() {
            forwarder.cancel.cancel();
            pending.push((id, forwarder.join));
        }
        self.mirror.clear();

        let grace = self.grace;
        let join_all = async {
            for (_, join) in pending.iter_mut() {
                let _ = join.await;
            }
        };
        if tokio::time::timeout(grace, join_all).await.is_err() {
            let stuck: Vec<SubscriptionId> = pending
                .iter()
                .filter(|(_, join)| !join.is_finished())
                .map(|(id, _)| id.clone())
                .collect();
            return Err(RuntimeError::GraceExceeded { grace, stuck });
        }
        Ok(())
    }
}
