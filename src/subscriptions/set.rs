//! # Desired subscription set.
//!
//! [`Subscriptions`] is the value `Program::subscriptions` returns: a
//! mapping from [`SubscriptionId`] to the source that should be running
//! under that id. It is recomputed fresh from the current model on every
//! transition; the registry diffs it against the running set.

use std::collections::HashMap;

use super::id::SubscriptionId;
use super::source::{EventSource, SourceRef};

/// Mapping from subscription id to its desired event source.
///
/// Duplicate ids within one set: the last insert wins.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use tealoop::sources::TickSource;
/// use tealoop::Subscriptions;
///
/// let subs: Subscriptions<u8> = Subscriptions::new()
///     .with("fast", TickSource::new(Duration::from_millis(100), 1))
///     .with("slow", TickSource::new(Duration::from_secs(1), 2));
/// assert_eq!(subs.len(), 2);
/// ```
pub struct Subscriptions<M> {
    entries: HashMap<SubscriptionId, SourceRef<M>>,
}

impl<M> Subscriptions<M> {
    /// Creates an empty set (the default for programs without subscriptions).
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Adds one subscription, builder style.
    #[must_use]
    pub fn with(mut self, id: impl Into<SubscriptionId>, source: impl EventSource<M>) -> Self {
        self.insert(id, source);
        self
    }

    /// Adds one subscription; replaces any source already stored for `id`.
    pub fn insert(&mut self, id: impl Into<SubscriptionId>, source: impl EventSource<M>) {
        self.entries.insert(id.into(), Box::new(source));
    }

    /// True if no subscriptions are desired.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of desired subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if `id` is part of this set.
    #[must_use]
    pub fn contains(&self, id: &SubscriptionId) -> bool {
        self.entries.contains_key(id)
    }

    pub(crate) fn into_entries(self) -> HashMap<SubscriptionId, SourceRef<M>> {
        self.entries
    }
}

impl<M> Default for Subscriptions<M> {
    fn default() -> Self {
        Self::new()
    }
}
