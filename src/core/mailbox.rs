//! # Inbound mailbox: the runtime's single serialized queue.
//!
//! [`Mailbox`] is a thin wrapper around an unbounded
//! [`tokio::sync::mpsc`] channel that provides non-blocking delivery from
//! many producers (external senders, effect tasks, forwarders) to the one
//! message-loop consumer.
//!
//! ## Rules
//! - **Non-blocking**: `deliver` never waits; the queue is unbounded.
//! - **Single consumer**: only the message loop holds the receiver; the
//!   order it dequeues is the authoritative message order.
//! - **No cross-producer ordering**: concurrent producers race for queue
//!   position; only per-producer FIFO holds.
//! - Delivery fails (returns `false`) once the loop has exited and dropped
//!   the receiver; producers treat that as a signal to wind down.

use tokio::sync::mpsc;

use crate::subscriptions::SubscriptionId;

/// Monotonic tag for one forwarder incarnation under an id.
///
/// A completion notice can sit in the queue while its id is removed and
/// desired again; the epoch lets the registry tell the exited incarnation
/// apart from its replacement.
pub(crate) type Epoch = u64;

/// One item on the inbound queue.
pub(crate) enum Inbound<M> {
    /// A program message to fold into the model.
    Message(M),
    /// A forwarder announcing natural completion of its source.
    SourceDone(SubscriptionId, Epoch),
}

/// Clone-able producer half of the inbound queue.
pub(crate) struct Mailbox<M> {
    tx: mpsc::UnboundedSender<Inbound<M>>,
}

impl<M> Clone for Mailbox<M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

/// Creates the mailbox and the receiver owned by the message loop.
pub(crate) fn mailbox<M>() -> (Mailbox<M>, mpsc::UnboundedReceiver<Inbound<M>>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Mailbox { tx }, rx)
}

impl<M> Mailbox<M> {
    /// Enqueues one program message. Returns `false` if the loop is gone.
    pub(crate) fn deliver(&self, message: M) -> bool {
        self.tx.send(Inbound::Message(message)).is_ok()
    }

    /// Announces that the source under `id` has completed naturally.
    pub(crate) fn source_done(&self, id: SubscriptionId, epoch: Epoch) {
        let _ = self.tx.send(Inbound::SourceDone(id, epoch));
    }
}
