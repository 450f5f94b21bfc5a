//! # Effect descriptors.
//!
//! An [`Effect`] describes a side effect to perform *after* a transition,
//! without performing it inline. `update` stays pure: it returns a
//! descriptor, and the runtime's executor runs it concurrently with the
//! message loop.
//!
//! ## Rules
//! - A `task` thunk yields **exactly one** message on completion.
//! - A thunk that panics yields nothing; the failure is invisible to the
//!   runtime. Encode failures as messages if they must be observable.
//! - A `batch` runs all children concurrently; its execution is considered
//!   complete only when every child has completed.
//!
//! ## Example
//! ```
//! use tealoop::Effect;
//!
//! enum Msg { Loaded(u32), Tick }
//!
//! let effect: Effect<Msg> = Effect::batch([
//!     Effect::msg(Msg::Tick),
//!     Effect::task(async { Msg::Loaded(load().await) }),
//! ]);
//! assert!(!effect.is_none());
//!
//! async fn load() -> u32 { 42 }
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Boxed thunk future yielding exactly one message.
pub type BoxMessageFuture<M> = Pin<Box<dyn Future<Output = M> + Send + 'static>>;

pub(crate) enum Kind<M> {
    /// Produces nothing.
    None,
    /// Asynchronous computation yielding one message on completion.
    Task(BoxMessageFuture<M>),
    /// Children run concurrently; complete when all children complete.
    Batch(Vec<Effect<M>>),
}

/// A description of a side effect requested by a transition.
///
/// Opaque by design: construct with [`Effect::none`], [`Effect::msg`],
/// [`Effect::task`] or [`Effect::batch`]; only the runtime's executor
/// consumes it.
pub struct Effect<M> {
    pub(crate) kind: Kind<M>,
}

impl<M> Effect<M> {
    /// An effect that does nothing.
    pub fn none() -> Self {
        Self { kind: Kind::None }
    }

    /// An effect that immediately yields `message` back into the mailbox.
    ///
    /// Shorthand for a ready `task`. The message still travels through the
    /// queue, so it is applied *after* any messages already buffered.
    pub fn msg(message: M) -> Self
    where
        M: Send + 'static,
    {
        Self::task(std::future::ready(message))
    }

    /// An effect that awaits `thunk` and yields its message.
    pub fn task<F>(thunk: F) -> Self
    where
        F: Future<Output = M> + Send + 'static,
    {
        Self {
            kind: Kind::Task(Box::pin(thunk)),
        }
    }

    /// An effect that runs every child concurrently.
    ///
    /// An empty batch normalizes to [`Effect::none`].
    pub fn batch<I>(effects: I) -> Self
    where
        I: IntoIterator<Item = Effect<M>>,
    {
        let children: Vec<Effect<M>> = effects.into_iter().collect();
        if children.is_empty() {
            return Self::none();
        }
        Self {
            kind: Kind::Batch(children),
        }
    }

    /// True if this effect produces nothing.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self.kind, Kind::None)
    }
}

impl<M> fmt::Debug for Effect<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::None => f.write_str("Effect::None"),
            Kind::Task(_) => f.write_str("Effect::Task"),
            Kind::Batch(children) => write!(f, "Effect::Batch(len={})", children.len()),
        }
    }
}
