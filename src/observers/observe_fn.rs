//! # Function-backed observer (`ObserverFn`)
//!
//! [`ObserverFn`] wraps a closure `Fn(&Model, &Effect<Message>)` so tests
//! and small programs can register an observer without a named type.
//!
//! ## Example
//! ```
//! use tealoop::{Effect, Observe, ObserverFn, Program};
//!
//! struct Counter;
//! impl Program for Counter {
//!     type Model = i64;
//!     type Message = ();
//!     fn init(&self) -> (i64, Effect<()>) { (0, Effect::none()) }
//!     fn update(&self, model: &i64, _msg: ()) -> (i64, Effect<()>) {
//!         (model + 1, Effect::none())
//!     }
//! }
//!
//! let observer = ObserverFn::new(|model: &i64, _effect: &Effect<()>| {
//!     println!("model is now {model}");
//! });
//! let _: &dyn Observe<Counter> = &observer;
//! ```

use std::sync::Arc;

use crate::effects::Effect;
use crate::program::Program;

use super::observe::Observe;

/// Function-backed observer implementation.
pub struct ObserverFn<F> {
    f: F,
}

impl<F> ObserverFn<F> {
    /// Creates a new function-backed observer.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the observer and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

impl<P, F> Observe<P> for ObserverFn<F>
where
    P: Program,
    F: Fn(&P::Model, &Effect<P::Message>) + Send + Sync + 'static,
{
    fn on_transition(&self, model: &P::Model, effect: &Effect<P::Message>) {
        (self.f)(model, effect);
    }

    fn name(&self) -> &'static str {
        "observer_fn"
    }
}
