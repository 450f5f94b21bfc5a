//! # Predefined event sources.
//!
//! Ready-made [`EventSource`] implementations for common shapes:
//!
//! - [`TickSource`] — emits a clone of one message at a fixed period; never
//!   completes naturally.
//! - [`IterSource`] — drains an iterator, then completes naturally.
//! - [`ChannelSource`] — shares one tokio mpsc receiver across repeated
//!   `subscriptions()` computations.
//!
//! `ChannelSource` exists because `subscriptions` is recomputed on every
//! transition and must be able to return a source value for an id that is
//! already running. A bare receiver can only be moved out once; the shared
//! handle can be cloned into every computed set, while only the forwarder
//! that actually started ever polls it.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{sleep, Duration};

use super::source::EventSource;

/// Emits `message.clone()` every `period`. Never completes.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use tealoop::sources::TickSource;
///
/// #[derive(Clone)]
/// struct Tick;
///
/// let _source = TickSource::new(Duration::from_millis(250), Tick);
/// ```
pub struct TickSource<M> {
    period: Duration,
    message: M,
}

impl<M> TickSource<M> {
    /// Creates a tick source with the given period.
    pub fn new(period: Duration, message: M) -> Self {
        Self { period, message }
    }
}

#[async_trait]
impl<M: Clone + Send + Sync + 'static> EventSource<M> for TickSource<M> {
    async fn next(&mut self) -> Option<M> {
        sleep(self.period).await;
        Some(self.message.clone())
    }
}

/// Drains an iterator, one message per `next` call, then completes.
///
/// Useful for replaying a fixed event script; the forwarder deregisters the
/// id once the iterator is exhausted.
pub struct IterSource<I> {
    items: I,
}

impl<I> IterSource<I> {
    /// Creates a source over anything that converts into an iterator.
    pub fn new<T>(items: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            items: items.into_iter(),
        }
    }
}

#[async_trait]
impl<M, I> EventSource<M> for IterSource<I>
where
    M: Send + 'static,
    I: Iterator<Item = M> + Send + 'static,
{
    async fn next(&mut self) -> Option<M> {
        self.items.next()
    }
}

/// A clone-able source backed by one shared tokio mpsc receiver.
///
/// All clones refer to the same receiver; at most one forwarder is running
/// per id, so the lock is uncontended in practice.
pub struct ChannelSource<M> {
    rx: Arc<Mutex<mpsc::UnboundedReceiver<M>>>,
}

impl<M> ChannelSource<M> {
    /// Creates the source plus the sender that feeds it.
    pub fn channel() -> (mpsc::UnboundedSender<M>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            tx,
            Self {
                rx: Arc::new(Mutex::new(rx)),
            },
        )
    }
}

impl<M> Clone for ChannelSource<M> {
    fn clone(&self) -> Self {
        Self {
            rx: Arc::clone(&self.rx),
        }
    }
}

#[async_trait]
impl<M: Send + 'static> EventSource<M> for ChannelSource<M> {
    async fn next(&mut self) -> Option<M> {
        self.rx.lock().await.recv().await
    }
}
