//! # Program contract: the pure half of the runtime.
//!
//! A [`Program`] supplies the three functions the runtime drives:
//! `init` produces the initial model and startup effect, `update` folds one
//! message into the current model, and `subscriptions` declares which
//! external event sources should be running for a given model.
//!
//! All three are pure with respect to the runtime: they never see the
//! mailbox, never block it, and request side effects only through the
//! returned [`Effect`] descriptor.

use crate::effects::Effect;
use crate::subscriptions::Subscriptions;

/// # The model-update-subscriptions contract.
///
/// The runtime owns exactly one current model at any time. `update` receives
/// a shared reference and returns a fresh model; the runtime swaps it in
/// atomically, so no two `update` calls ever run concurrently and no reader
/// observes a half-applied transition.
///
/// # Example
/// ```
/// use tealoop::{Effect, Program};
///
/// struct Counter;
///
/// enum Msg {
///     Increment,
///     Decrement,
/// }
///
/// impl Program for Counter {
///     type Model = i64;
///     type Message = Msg;
///
///     fn init(&self) -> (i64, Effect<Msg>) {
///         (0, Effect::none())
///     }
///
///     fn update(&self, model: &i64, message: Msg) -> (i64, Effect<Msg>) {
///         match message {
///             Msg::Increment => (model + 1, Effect::none()),
///             Msg::Decrement => (model - 1, Effect::none()),
///         }
///     }
/// }
/// ```
pub trait Program: Send + Sync + 'static {
    /// The state value owned by the runtime.
    type Model: Send + Sync + 'static;

    /// The event value that drives transitions.
    type Message: Send + 'static;

    /// Produces the initial model and the effect to execute for it.
    ///
    /// Called exactly once, before any message is applied.
    fn init(&self) -> (Self::Model, Effect<Self::Message>);

    /// Folds one message into the current model.
    ///
    /// Returns the replacement model and the effect to execute for this
    /// transition. Must not block; long-running work belongs in the effect.
    fn update(
        &self,
        model: &Self::Model,
        message: Self::Message,
    ) -> (Self::Model, Effect<Self::Message>);

    /// Declares the event sources that should be running for `model`.
    ///
    /// Called on the initial model and after every transition. The runtime
    /// diffs the returned set against currently running ids: removed ids
    /// are cancelled, new ids are started, and an id present in both sets
    /// keeps its existing forwarder even if the supplied source differs —
    /// identity, not content, determines continuity.
    fn subscriptions(&self, model: &Self::Model) -> Subscriptions<Self::Message> {
        let _ = model;
        Subscriptions::new()
    }
}
