//! # ObserverSet: in-order delivery with panic isolation.
//!
//! Fans one transition out to every registered observer, in registration
//! order, on the calling task.
//!
//! ## What it guarantees
//! - Registration order is invocation order.
//! - Panics inside an observer are caught; remaining observers still run.
//!
//! ## What it does **not** guarantee
//! - No concurrency: a slow observer delays the message loop. Observers are
//!   a visibility side channel, not a work queue.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::effects::Effect;
use crate::program::Program;

use super::observe::ObserverRef;

/// Ordered collection of observers sharing one transition feed.
pub struct ObserverSet<P: Program> {
    observers: Vec<ObserverRef<P>>,
}

impl<P: Program> ObserverSet<P> {
    /// Creates a set over the given observers.
    pub fn new(observers: Vec<ObserverRef<P>>) -> Self {
        Self { observers }
    }

    /// Appends one observer; it sees transitions registered after this call.
    pub fn push(&mut self, observer: ObserverRef<P>) {
        self.observers.push(observer);
    }

    /// Snapshot of the current observer handles, in registration order.
    ///
    /// The loop emits against a snapshot so an observer that registers
    /// another observer never deadlocks on the set's lock.
    pub fn snapshot(&self) -> Vec<ObserverRef<P>> {
        self.observers.clone()
    }

    /// Delivers one transition to every observer in order.
    pub fn emit(observers: &[ObserverRef<P>], model: &P::Model, effect: &Effect<P::Message>) {
        for observer in observers {
            // Isolate panicking observers; the transition itself already happened.
            let _ = catch_unwind(AssertUnwindSafe(|| observer.on_transition(model, effect)));
        }
    }
}
