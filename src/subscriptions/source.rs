//! # Event source trait.
//!
//! An [`EventSource`] is an externally driven producer of messages. The
//! runtime attaches one forwarder task per running source; the forwarder
//! repeatedly awaits [`EventSource::next`] and relays each message into the
//! inbound queue.
//!
//! ## Contract
//! - `next` returning `Some(message)` hands one event to the runtime.
//! - `next` returning `None` means **natural completion**: the forwarder
//!   deregisters its own id and exits; no error is reported.
//! - A panic inside `next` is indistinguishable from completion at the
//!   registry level: the id is deregistered, nothing else happens.
//! - Cancellation is cooperative: the forwarder stops awaiting `next` when
//!   its id is removed, but the upstream producer is not forcibly halted.
//!
//! ## Example
//! ```
//! use async_trait::async_trait;
//! use tealoop::EventSource;
//!
//! struct Countdown(u8);
//!
//! #[async_trait]
//! impl EventSource<u8> for Countdown {
//!     async fn next(&mut self) -> Option<u8> {
//!         if self.0 == 0 {
//!             return None; // exhausted: the forwarder deregisters its id
//!         }
//!         self.0 -= 1;
//!         Some(self.0)
//!     }
//! }
//! ```

use async_trait::async_trait;

/// Contract for long-lived external event producers.
///
/// Driven from a forwarder-dedicated task. Implementations should prefer
/// async waits; a `next` that blocks the thread can only be interrupted at
/// shutdown by the grace timeout.
#[async_trait]
pub trait EventSource<M>: Send + 'static {
    /// Awaits the next event, or `None` when the source is exhausted.
    async fn next(&mut self) -> Option<M>;
}

/// Boxed source handle stored in a [`Subscriptions`](crate::Subscriptions) set.
pub type SourceRef<M> = Box<dyn EventSource<M>>;

#[async_trait]
impl<M: Send + 'static> EventSource<M> for tokio::sync::mpsc::Receiver<M> {
    async fn next(&mut self) -> Option<M> {
        self.recv().await
    }
}

#[async_trait]
impl<M: Send + 'static> EventSource<M> for tokio::sync::mpsc::UnboundedReceiver<M> {
    async fn next(&mut self) -> Option<M> {
        self.recv().await
    }
}
