//! Subscription identity, event sources, and the desired-set type.
//!
//! A subscription is a long-lived external event source whose lifetime is
//! tied to a computed [`SubscriptionId`] rather than to a single transition.
//! Programs declare the desired set via [`Subscriptions`]; the runtime's
//! registry starts and stops forwarders to make the running set converge.

mod id;
mod set;
mod source;
pub mod sources;

pub use id::SubscriptionId;
pub use set::Subscriptions;
pub use source::{EventSource, SourceRef};
