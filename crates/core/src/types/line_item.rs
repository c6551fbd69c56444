//! Line items and add-to-cart candidates.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::LineItemId;
use super::price::Price;

/// One distinct product in the cart.
///
/// Field order and names match the persisted layout:
/// `{"id", "name", "price", "image", "quantity"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Assigned when the product first enters the cart.
    pub id: LineItemId,
    /// Display name; the deduplication key.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Display asset URI. Informational only.
    pub image: String,
    /// Number of units; never zero while the item is in the cart.
    pub quantity: NonZeroU32,
}

impl LineItem {
    /// Build a fresh line item with a quantity of one.
    #[must_use]
    pub fn from_candidate(id: LineItemId, candidate: CandidateItem) -> Self {
        Self {
            id,
            name: candidate.name,
            price: candidate.price,
            image: candidate.image,
            quantity: NonZeroU32::MIN,
        }
    }

    /// `price * quantity`, or `None` if it overflows a decimal.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.price
            .amount()
            .checked_mul(Decimal::from(self.quantity.get()))
    }
}

/// What an add-to-cart interaction supplies: no id and no quantity, those
/// are assigned by the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateItem {
    pub name: String,
    pub price: Price,
    pub image: String,
}

impl CandidateItem {
    /// Create a candidate.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Price, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}
