//! Line-item ids and the generators that mint them.
//!
//! Ids are opaque strings assigned when a product first enters the cart. The
//! persisted layout stores them as plain JSON strings, so [`LineItemId`] is a
//! transparent newtype over `String`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of one line item, unique within a cart.
///
/// # Example
///
/// ```rust
/// # use aso_cart_core::LineItemId;
/// let id = LineItemId::new("k3j2h1x9z");
/// assert_eq!(id.as_str(), "k3j2h1x9z");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(String);

impl LineItemId {
    /// Create an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id and return its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LineItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for LineItemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<LineItemId> for String {
    fn from(id: LineItemId) -> Self {
        id.0
    }
}

impl AsRef<str> for LineItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Source of fresh line-item ids.
///
/// Injected into the cart store so tests can use a deterministic sequence
/// while the page uses random ids. Generators are not required to guarantee
/// uniqueness on their own; the store rejects ids already present in the cart
/// and asks again.
pub trait IdGenerator {
    /// Produce the next candidate id.
    fn next_id(&mut self) -> LineItemId;
}

impl<F> IdGenerator for F
where
    F: FnMut() -> LineItemId,
{
    fn next_id(&mut self) -> LineItemId {
        self()
    }
}

/// Deterministic generator yielding `item-1`, `item-2`, ...
#[derive(Debug, Clone, Default)]
pub struct SequenceIdGenerator {
    prefix: Option<String>,
    next: u64,
}

impl SequenceIdGenerator {
    /// Prefix used when none is given.
    pub const DEFAULT_PREFIX: &'static str = "item";

    /// Create a generator with the default `item` prefix.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prefix: None,
            next: 0,
        }
    }

    /// Create a generator with a custom prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            next: 0,
        }
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_id(&mut self) -> LineItemId {
        self.next += 1;
        let prefix = self.prefix.as_deref().unwrap_or(Self::DEFAULT_PREFIX);
        LineItemId(format!("{prefix}-{}", self.next))
    }
}

/// Generator backed by random (v4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> LineItemId {
        LineItemId(uuid::Uuid::new_v4().to_string())
    }
}
