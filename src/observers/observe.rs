//! # Core observer trait.
//!
//! `Observe` is the extension point for side-channel visibility into the
//! runtime: each registered observer is invoked, in registration order, on
//! every transition — the initial one included — with the new model and the
//! effect that is about to be executed.
//!
//! ## Contract
//! - Observers have **no control-flow effect**: they cannot veto a
//!   transition, reorder messages, or alter the effect.
//! - Invocation happens on the message-loop task, *after* the subscription
//!   re-diff and *before* the effect is launched. Keep implementations
//!   cheap; long work belongs in an effect or a downstream channel.
//! - A panicking observer is caught and skipped for that transition.

use std::sync::Arc;

use crate::effects::Effect;
use crate::program::Program;

/// Contract for transition observers.
///
/// Called synchronously from the message loop. Implementations that need to
/// hand data to another task should use a non-blocking send (e.g. a watch or
/// unbounded channel) rather than waiting inline.
pub trait Observe<P: Program>: Send + Sync + 'static {
    /// Handles one transition: the freshly applied model and the effect the
    /// runtime will execute for it.
    fn on_transition(&self, model: &P::Model, effect: &Effect<P::Message>);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Shared observer handle stored by the runtime.
pub type ObserverRef<P> = Arc<dyn Observe<P>>;
