//! # Simple logging observer for debugging and demos.
//!
//! [`LogObserver`] prints every transition to stdout in a human-readable
//! format. Primarily useful for development and examples.
//!
//! ## Output format
//! ```text
//! [transition] model=3 effect=Effect::None
//! [transition] model=4 effect=Effect::Task
//! ```

use std::fmt::Debug;

use crate::effects::Effect;
use crate::program::Program;

use super::observe::Observe;

/// Simple stdout logging observer.
///
/// Enabled via the `logging` feature; requires `Debug` on the program's
/// model. Not intended for production use — implement a custom [`Observe`]
/// for structured logging or metrics collection.
#[derive(Default)]
pub struct LogObserver;

impl<P> Observe<P> for LogObserver
where
    P: Program,
    P::Model: Debug,
{
    fn on_transition(&self, model: &P::Model, effect: &Effect<P::Message>) {
        println!("[transition] model={model:?} effect={effect:?}");
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
