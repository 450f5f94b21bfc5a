//! Runtime core: orchestration and lifecycle.
//!
//! The public API from this module is [`Runtime`] (with its [`Handle`] and
//! [`RuntimeBuilder`]) plus [`Config`].
//!
//! Internal modules:
//! - [`mailbox`]: the unbounded inbound queue and its item type;
//! - [`executor`]: runs effect descriptors, fan-out/fan-in for batches;
//! - [`forwarder`]: relays one event source into the mailbox;
//! - [`registry`]: id-keyed forwarder lifecycle and diffing;
//! - [`active`]: membership mirror backing the query surface;
//! - [`runtime`]: the serialized message loop and public surface.

mod active;
mod builder;
mod config;
mod executor;
mod forwarder;
mod mailbox;
mod registry;
mod runtime;

pub use builder::RuntimeBuilder;
pub use config::Config;
pub use runtime::{Handle, Runtime};
