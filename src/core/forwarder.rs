//! # Forwarder: relay task between one event source and the mailbox.
//!
//! One forwarder runs per active subscription id:
//!
//! ```text
//! loop {
//!   select! {
//!     cancelled  → exit (registry removed the id, or the runtime stopped)
//!     next(...)  → Some(msg)      → deliver to mailbox
//!                → None / panic   → source_done(id, epoch), exit
//!   }
//! }
//! ```
//!
//! ## Rules
//! - Cancellation is cooperative: it stops further relaying but does not
//!   force the upstream producer to halt.
//! - Natural completion (`None`) and a panicking source are handled the
//!   same way: the forwarder deregisters its own id via the mailbox and
//!   exits, with no error signal of any kind.
//! - A closed mailbox (loop already gone) simply ends the relay.

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio_util::sync::CancellationToken;

use crate::subscriptions::{SourceRef, SubscriptionId};

use super::mailbox::{Epoch, Mailbox};

/// Relays events from `source` into the mailbox until cancelled or exhausted.
///
/// `epoch` identifies this incarnation of the id; it is echoed back on the
/// completion notice so the registry never acts on a stale one.
pub(crate) async fn forward<M: Send + 'static>(
    id: SubscriptionId,
    epoch: Epoch,
    mut source: SourceRef<M>,
    mailbox: Mailbox<M>,
    cancel: CancellationToken,
) {
    loop {
        let next = AssertUnwindSafe(source.next()).catch_unwind();
        tokio::select! {
            _ = cancel.cancelled() => break,
            event = next => match event {
                Ok(Some(message)) => {
                    if !mailbox.deliver(message) {
                        break;
                    }
                }
                // Exhausted or panicked: indistinguishable at the registry
                // level, both deregister the id.
                Ok(None) | Err(_) => {
                    mailbox.source_done(id, epoch);
                    break;
                }
            }
        }
    }
}
