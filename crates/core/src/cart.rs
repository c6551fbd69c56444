//! The cart state machine.
//!
//! A [`Cart`] is an ordered sequence of [`LineItem`]s with unique ids. Line
//! items are deduplicated by exact, case-sensitive name: adding a product that
//! is already present bumps its quantity instead of appending a second line.
//!
//! All transitions here are pure. Persisting after each one is the job of the
//! storefront's `CartStore`.

use std::collections::HashSet;
use std::num::NonZeroU32;

use rust_decimal::Decimal;

use crate::types::{CandidateItem, IdGenerator, LineItem, LineItemId};

/// Errors from encoding or decoding the persisted cart layout.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("cart JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// What [`Cart::add`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line item was appended.
    Inserted(LineItemId),
    /// An existing line item with the same name gained one unit.
    Incremented {
        id: LineItemId,
        quantity: NonZeroU32,
    },
}

impl AddOutcome {
    /// Id of the line item that was touched.
    #[must_use]
    pub const fn id(&self) -> &LineItemId {
        match self {
            Self::Inserted(id) | Self::Incremented { id, .. } => id,
        }
    }
}

/// What [`Cart::set_quantity`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line item now has this quantity.
    Updated(NonZeroU32),
    /// The requested quantity was zero or negative, so the line was removed.
    Removed(LineItem),
    /// No line item has that id.
    NotFound,
}

/// Ordered collection of line items, unique by id and by name.
///
/// There is no serde impl: decode through [`Cart::from_json`] so duplicate
/// ids are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from already-ordered items, keeping the first line item
    /// for each id.
    ///
    /// Returns the cart and the number of duplicate lines dropped.
    #[must_use]
    pub fn from_items(items: Vec<LineItem>) -> (Self, usize) {
        let total = items.len();
        let mut seen = HashSet::with_capacity(total);
        let items: Vec<LineItem> = items
            .into_iter()
            .filter(|item| seen.insert(item.id.clone()))
            .collect();
        let dropped = total - items.len();
        (Self { items }, dropped)
    }

    /// Decode the persisted JSON array.
    ///
    /// Duplicate ids are resolved as in [`Cart::from_items`]; the count of
    /// dropped lines is returned alongside the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Json`] if the text is not an array of valid line
    /// items (zero quantities and negative prices are invalid).
    pub fn from_json(raw: &str) -> Result<(Self, usize), CodecError> {
        let items: Vec<LineItem> = serde_json::from_str(raw)?;
        Ok(Self::from_items(items))
    }

    /// Encode the whole cart as the persisted JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line item by id.
    #[must_use]
    pub fn get(&self, id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Look up a line item by exact name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Whether a line item with this id exists.
    #[must_use]
    pub fn contains(&self, id: &LineItemId) -> bool {
        self.get(id).is_some()
    }

    /// Sum of quantities across all line items.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of `price * quantity` across all line items, or `None` if it
    /// overflows a decimal.
    #[must_use]
    pub fn subtotal(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.line_total()?))
    }

    /// Add one unit of a product.
    ///
    /// A line item with the same name gains one unit and keeps its original
    /// id, price and image. Otherwise a new line item is appended with an id
    /// drawn from `ids` that is not already in the cart.
    pub fn add<G>(&mut self, candidate: CandidateItem, ids: &mut G) -> AddOutcome
    where
        G: IdGenerator + ?Sized,
    {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.name == candidate.name)
        {
            existing.quantity = existing.quantity.saturating_add(1);
            return AddOutcome::Incremented {
                id: existing.id.clone(),
                quantity: existing.quantity,
            };
        }

        let id = self.fresh_id(ids);
        self.items
            .push(LineItem::from_candidate(id.clone(), candidate));
        AddOutcome::Inserted(id)
    }

    /// Remove the line item with this id, if any.
    pub fn remove(&mut self, id: &LineItemId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Set a line item's quantity. Zero or below removes it.
    ///
    /// Quantities above `u32::MAX` are clamped.
    pub fn set_quantity(&mut self, id: &LineItemId, quantity: i64) -> QuantityChange {
        let Ok(positive) = u64::try_from(quantity) else {
            return self.remove_for_quantity(id);
        };
        let Some(quantity) = NonZeroU32::new(u32::try_from(positive).unwrap_or(u32::MAX)) else {
            return self.remove_for_quantity(id);
        };

        match self.items.iter_mut().find(|item| &item.id == id) {
            Some(item) => {
                item.quantity = quantity;
                QuantityChange::Updated(quantity)
            }
            None => QuantityChange::NotFound,
        }
    }

    fn remove_for_quantity(&mut self, id: &LineItemId) -> QuantityChange {
        self.remove(id)
            .map_or(QuantityChange::NotFound, QuantityChange::Removed)
    }

    fn fresh_id<G>(&self, ids: &mut G) -> LineItemId
    where
        G: IdGenerator + ?Sized,
    {
        loop {
            let id = ids.next_id();
            if !self.contains(&id) {
                return id;
            }
        }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Price, SequenceIdGenerator};

    fn caftan(name: &str, price: u32, image: &str) -> CandidateItem {
        CandidateItem::new(name, Price::from(price), image)
    }

    #[test]
    fn test_add_new_item() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();

        let outcome = cart.add(caftan("Caftan A", 1000, "a.png"), &mut ids);

        assert_eq!(outcome, AddOutcome::Inserted(LineItemId::new("item-1")));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_add_same_name_twice_increments() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();

        cart.add(caftan("Caftan A", 1000, "a.png"), &mut ids);
        let outcome = cart.add(caftan("Caftan A", 1000, "a.png"), &mut ids);

        assert!(matches!(outcome, AddOutcome::Incremented { quantity, .. } if quantity.get() == 2));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity.get(), 2);
    }

    #[test]
    fn test_repeat_add_keeps_first_price_and_image() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();

        cart.add(caftan("Caftan A", 1000, "a.png"), &mut ids);
        cart.add(caftan("Caftan A", 2500, "b.png"), &mut ids);

        let item = cart.find_by_name("Caftan A").unwrap();
        assert_eq!(item.id.as_str(), "item-1");
        assert_eq!(item.price, Price::from(1000));
        assert_eq!(item.image, "a.png");
    }

    #[test]
    fn test_name_match_is_case_sensitive() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();

        cart.add(caftan("Caftan A", 1000, ""), &mut ids);
        cart.add(caftan("caftan a", 1000, ""), &mut ids);

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();

        cart.add(caftan("B", 1, ""), &mut ids);
        cart.add(caftan("A", 1, ""), &mut ids);
        cart.add(caftan("B", 1, ""), &mut ids);
        cart.add(caftan("C", 1, ""), &mut ids);

        let names: Vec<&str> = cart.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["B", "A", "C"]);
    }

    #[test]
    fn test_add_skips_colliding_ids() {
        let mut cart = Cart::new();
        let mut calls = 0;
        let mut ids = || {
            calls += 1;
            if calls <= 2 {
                LineItemId::new("same")
            } else {
                LineItemId::new("other")
            }
        };

        cart.add(caftan("A", 1, ""), &mut ids);
        cart.add(caftan("B", 1, ""), &mut ids);

        assert_eq!(cart.items()[0].id.as_str(), "same");
        assert_eq!(cart.items()[1].id.as_str(), "other");
    }

    #[test]
    fn test_remove_existing() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();
        cart.add(caftan("A", 1, ""), &mut ids);

        let removed = cart.remove(&LineItemId::new("item-1")).unwrap();

        assert_eq!(removed.name, "A");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();
        cart.add(caftan("A", 1, ""), &mut ids);
        let before = cart.clone();

        assert!(cart.remove(&LineItemId::new("missing")).is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity_positive() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();
        cart.add(caftan("A", 1, ""), &mut ids);

        let change = cart.set_quantity(&LineItemId::new("item-1"), 5);

        assert_eq!(change, QuantityChange::Updated(NonZeroU32::new(5).unwrap()));
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();
        cart.add(caftan("A", 1, ""), &mut ids);
        let id = LineItemId::new("item-1");

        assert!(matches!(cart.set_quantity(&id, 0), QuantityChange::Removed(_)));
        assert!(!cart.contains(&id));
    }

    #[test]
    fn test_set_quantity_negative_removes() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();
        cart.add(caftan("A", 1, ""), &mut ids);

        assert!(matches!(
            cart.set_quantity(&LineItemId::new("item-1"), -3),
            QuantityChange::Removed(_)
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_is_noop() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();
        cart.add(caftan("A", 1, ""), &mut ids);
        let before = cart.clone();

        assert_eq!(
            cart.set_quantity(&LineItemId::new("missing"), 4),
            QuantityChange::NotFound
        );
        assert_eq!(
            cart.set_quantity(&LineItemId::new("missing"), 0),
            QuantityChange::NotFound
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity_clamps_large_values() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();
        cart.add(caftan("A", 1, ""), &mut ids);

        cart.set_quantity(&LineItemId::new("item-1"), i64::MAX);

        assert_eq!(cart.total_quantity(), u64::from(u32::MAX));
    }

    #[test]
    fn test_increment_saturates() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();
        cart.add(caftan("A", 1, ""), &mut ids);
        cart.set_quantity(&LineItemId::new("item-1"), i64::from(u32::MAX));

        cart.add(caftan("A", 1, ""), &mut ids);

        assert_eq!(cart.items()[0].quantity.get(), u32::MAX);
    }

    #[test]
    fn test_total_quantity_tracks_every_mutation() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();
        let sum = |cart: &Cart| -> u64 {
            cart.items()
                .iter()
                .map(|i| u64::from(i.quantity.get()))
                .sum()
        };

        assert_eq!(cart.total_quantity(), 0);
        cart.add(caftan("A", 1, ""), &mut ids);
        cart.add(caftan("B", 1, ""), &mut ids);
        cart.add(caftan("A", 1, ""), &mut ids);
        assert_eq!(cart.total_quantity(), sum(&cart));
        cart.set_quantity(&LineItemId::new("item-2"), 7);
        assert_eq!(cart.total_quantity(), sum(&cart));
        cart.remove(&LineItemId::new("item-1"));
        assert_eq!(cart.total_quantity(), sum(&cart));
        assert_eq!(cart.total_quantity(), 7);
    }

    #[test]
    fn test_subtotal() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();
        cart.add(caftan("A", 1000, ""), &mut ids);
        cart.add(caftan("A", 1000, ""), &mut ids);
        cart.add(caftan("B", 250, ""), &mut ids);

        assert_eq!(cart.subtotal(), Some(Decimal::from(2250)));
        assert_eq!(Cart::new().subtotal(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_subtotal_overflow_is_none() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();
        let huge = Price::parse_leading("100000000000000000000").unwrap();
        let id = cart
            .add(CandidateItem::new("Caftan A", huge, ""), &mut ids)
            .id()
            .clone();
        assert_eq!(cart.subtotal(), Some(huge.amount()));

        cart.set_quantity(&id, 1_000_000_000);

        assert_eq!(cart.subtotal(), None);
        assert_eq!(cart.total_quantity(), 1_000_000_000);
    }

    #[test]
    fn test_subtotal_overflow_across_lines_is_none() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();
        let big = Price::parse_leading("40000000000000000000000000000").unwrap();
        cart.add(CandidateItem::new("A", big, ""), &mut ids);
        cart.add(CandidateItem::new("B", big, ""), &mut ids);

        assert!(cart.items().iter().all(|item| item.line_total().is_some()));
        assert_eq!(cart.subtotal(), None);
    }

    #[test]
    fn test_long_price_roundtrip() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();
        let price = Price::parse_leading("123456789012345678901").unwrap();
        cart.add(CandidateItem::new("Caftan A", price, "a.png"), &mut ids);

        let (decoded, _) = Cart::from_json(&cart.to_json().unwrap()).unwrap();

        assert_eq!(decoded, cart);
    }

    #[test]
    fn test_json_roundtrip_preserves_everything() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();
        cart.add(caftan("Caftan A", 1000, "a.png"), &mut ids);
        cart.add(
            CandidateItem::new("Caftan B", "19.99".parse().unwrap(), "b.png"),
            &mut ids,
        );
        cart.add(caftan("Caftan A", 1000, "a.png"), &mut ids);

        let json = cart.to_json().unwrap();
        let (decoded, dropped) = Cart::from_json(&json).unwrap();

        assert_eq!(dropped, 0);
        assert_eq!(decoded, cart);
    }

    #[test]
    fn test_from_json_reads_browser_layout() {
        let raw = r#"[{"id":"k3j2h1x9z","name":"ASO's Moroccan Caftan","price":10000,"image":"","quantity":3}]"#;
        let (cart, _) = Cart::from_json(raw).unwrap();

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.items()[0].price, Price::from(10000));
    }

    #[test]
    fn test_from_json_drops_duplicate_ids() {
        let raw = r#"[
            {"id":"a","name":"One","price":1,"image":"","quantity":1},
            {"id":"a","name":"Two","price":1,"image":"","quantity":4}
        ]"#;
        let (cart, dropped) = Cart::from_json(raw).unwrap();

        assert_eq!(dropped, 1);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].name, "One");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Cart::from_json("not json").is_err());
        assert!(Cart::from_json("{}").is_err());
        assert!(Cart::from_json(r#"[{"id":"a"}]"#).is_err());
        assert!(
            Cart::from_json(r#"[{"id":"a","name":"n","price":-1,"image":"","quantity":1}]"#)
                .is_err()
        );
    }

    #[test]
    fn test_scenario_from_empty_to_empty() {
        let mut cart = Cart::new();
        let mut ids = SequenceIdGenerator::new();

        let id = cart
            .add(caftan("Caftan A", 1000, "a.png"), &mut ids)
            .id()
            .clone();
        assert_eq!(cart.total_quantity(), 1);
        assert_eq!(cart.items()[0].price, Price::from(1000));

        cart.add(caftan("Caftan A", 1000, "a.png"), &mut ids);
        assert_eq!(cart.total_quantity(), 2);

        cart.set_quantity(&id, 5);
        assert_eq!(cart.get(&id).unwrap().quantity.get(), 5);
        assert_eq!(cart.total_quantity(), 5);

        cart.remove(&id);
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
        assert_eq!(cart.to_json().unwrap(), "[]");
    }
}
