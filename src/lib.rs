//! # tealoop
//!
//! **tealoop** is a minimal model-update-effect runtime for async Rust.
//!
//! A pure [`Program`] (initial state, transition function, subscription
//! declaration) is driven by a serialized stream of messages, while
//! asynchronous side effects and long-lived event sources feed new messages
//! back into that stream. The runtime guarantees exactly-once, in-order
//! state mutation with arbitrary concurrency for effects and sources, and
//! no shared mutable access to the model.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  send(msg)      Effect tasks        Subscription forwarders
//!     │                │                       │
//!     └────────────────┴───────────┬───────────┘
//!                                  ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Mailbox (unbounded MPSC, single consumer)                    │
//! └───────────────────────────────┬───────────────────────────────┘
//!                                 ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Message loop (exclusive owner of model + registry)           │
//! │    update(model, msg) ─► (model', effect)                     │
//! │    1. swap model'  (watch publish)                            │
//! │    2. re-diff subscriptions(model') against running ids       │
//! │    3. notify observers in registration order                  │
//! │    4. launch effect (detached)                                │
//! └──────┬─────────────────────┬──────────────────────┬───────────┘
//!        ▼                     ▼                      ▼
//!   watch snapshots      Registry                Executor
//!   (current_model,   (start/cancel/keep     (tasks spawned, batch
//!    watch_model)      forwarders by id)      fan-out via JoinSet)
//! ```
//!
//! ### Lifecycle
//! ```text
//! Created ──run()──► Running ──stop()──► Stopped
//!
//! run():  init() seed → loop → drain buffered → forwarder shutdown (grace)
//! stop(): later sends dropped, buffered messages still applied,
//!         forwarders cancelled (cooperative)
//! ```
//!
//! ## Ordering guarantees
//! - Messages are applied in the order they are dequeued; no two `update`
//!   calls ever run concurrently.
//! - Enqueue order across independent producers (batch children, several
//!   subscriptions, external senders) is not guaranteed relative to one
//!   another; only the realized queue order is authoritative.
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogObserver`] _(demo/reference only)_.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use tealoop::{Effect, Program, Runtime};
//!
//! struct Counter;
//!
//! enum Msg {
//!     Increment,
//!     Decrement,
//! }
//!
//! impl Program for Counter {
//!     type Model = i64;
//!     type Message = Msg;
//!
//!     fn init(&self) -> (i64, Effect<Msg>) {
//!         (0, Effect::none())
//!     }
//!
//!     fn update(&self, model: &i64, message: Msg) -> (i64, Effect<Msg>) {
//!         match message {
//!             Msg::Increment => (model + 1, Effect::none()),
//!             Msg::Decrement => (model - 1, Effect::none()),
//!         }
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runtime = Arc::new(Runtime::new(Counter));
//!     let handle = runtime.handle();
//!
//!     let loop_task = tokio::spawn({
//!         let runtime = Arc::clone(&runtime);
//!         async move { runtime.run().await }
//!     });
//!
//!     handle.send(Msg::Increment);
//!     handle.send(Msg::Increment);
//!     handle.send(Msg::Decrement);
//!
//!     handle.stop();
//!     loop_task.await??;
//!
//!     assert_eq!(handle.current_model().map(|m| *m), Some(1));
//!     Ok(())
//! }
//! ```

mod core;
mod effects;
mod error;
mod observers;
mod program;
mod subscriptions;

// ---- Public re-exports ----

pub use core::{Config, Handle, Runtime, RuntimeBuilder};
pub use effects::{BoxMessageFuture, Effect};
pub use error::RuntimeError;
pub use observers::{Observe, ObserverFn, ObserverRef, ObserverSet};
pub use program::Program;
pub use subscriptions::{sources, EventSource, SourceRef, SubscriptionId, Subscriptions};

// Optional: expose a simple built-in logging observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogObserver;
