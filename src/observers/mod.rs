//! Transition observers: the runtime's visibility side channel.

mod observe;
mod observe_fn;
mod set;

pub use observe::{Observe, ObserverRef};
pub use observe_fn::ObserverFn;
pub use set::ObserverSet;

#[cfg(feature = "logging")]
mod log;
#[cfg(feature = "logging")]
pub use log::LogObserver;
