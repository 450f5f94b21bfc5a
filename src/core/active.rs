//! # Active-subscription mirror for the query surface.
//!
//! The registry itself lives inside the message loop and is never shared.
//! [`ActiveIds`] mirrors its key set behind a mutex so `is_subscribed` and
//! `active_subscriptions` can answer from any task.
//!
//! ## Rules
//! - Only the message loop mutates the mirror (insert/remove track the
//!   registry exactly).
//! - Reads are point-in-time snapshots, subject to the same race as any
//!   query against actively mutating state.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::subscriptions::SubscriptionId;

/// Thread-safe mirror of the registry's key set.
#[derive(Default)]
pub(crate) struct ActiveIds {
    ids: Mutex<HashSet<SubscriptionId>>,
}

impl ActiveIds {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, id: SubscriptionId) {
        self.lock().insert(id);
    }

    pub(crate) fn remove(&self, id: &SubscriptionId) {
        self.lock().remove(id);
    }

    pub(crate) fn clear(&self) {
        self.lock().clear();
    }

    /// True if `id` is currently registered.
    pub(crate) fn contains(&self, id: &SubscriptionId) -> bool {
        self.lock().contains(id)
    }

    /// Returns the sorted list of currently registered ids.
    pub(crate) fn snapshot(&self) -> Vec<SubscriptionId> {
        let mut ids: Vec<SubscriptionId> = self.lock().iter().cloned().collect();
        ids.sort_unstable();
        ids
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<SubscriptionId>> {
        // The mirror holds no invariants beyond set membership, so a
        // poisoned lock is still usable.
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
