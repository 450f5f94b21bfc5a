//! # Subscription identity.
//!
//! A [`SubscriptionId`] is the stable key a subscription lives under. The
//! registry diffs desired against running *ids*; the source value attached
//! to an id is irrelevant once that id is running.

use std::borrow::Cow;
use std::fmt;

/// Opaque, comparable, hashable key identifying one subscription.
///
/// Cheap to construct from string literals; owned strings are supported for
/// ids derived from model data (e.g. one id per connected peer).
///
/// # Example
/// ```
/// use tealoop::SubscriptionId;
///
/// let fixed = SubscriptionId::from("clock");
/// let dynamic = SubscriptionId::from(format!("peer:{}", 7));
/// assert_eq!(fixed.as_str(), "clock");
/// assert!(dynamic > fixed);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(Cow<'static, str>);

impl SubscriptionId {
    /// Creates an id from any string-ish value.
    pub fn new(id: impl Into<Cow<'static, str>>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for SubscriptionId {
    fn from(id: &'static str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SubscriptionId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
