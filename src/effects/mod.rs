//! Effect descriptors returned by program transitions.

mod effect;

pub use effect::{BoxMessageFuture, Effect};
pub(crate) use effect::Kind;
