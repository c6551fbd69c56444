//! The persisting cart store.
//!
//! [`CartStore`] keeps the [`Cart`] in memory and mirrors it into injected
//! [`CartStorage`] after every mutation. Every operation is best-effort:
//!
//! - A missing or unparseable stored value loads as an empty cart.
//! - A failed write is logged and the in-memory mutation stands.
//! - Unknown ids on remove/update are ignored.
//!
//! Nothing here returns an error to the caller.

use aso_cart_core::{
    AddOutcome, CandidateItem, Cart, IdGenerator, LineItem, LineItemId, QuantityChange,
};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::ids::RandomIdGenerator;
use crate::storage::CartStorage;

/// Cart state plus the storage it is persisted to.
#[derive(Debug)]
pub struct CartStore<S, G = RandomIdGenerator> {
    storage: S,
    ids: G,
    cart: Cart,
}

impl<S: CartStorage> CartStore<S, RandomIdGenerator> {
    /// Load the cart from `storage`, minting random ids for new line items.
    pub fn initialize(storage: S) -> Self {
        Self::with_id_generator(storage, RandomIdGenerator)
    }
}

impl<S, G> CartStore<S, G>
where
    S: CartStorage,
    G: IdGenerator,
{
    /// Load the cart from `storage`, minting ids with `ids`.
    ///
    /// Absent or corrupt state yields an empty cart.
    pub fn with_id_generator(storage: S, ids: G) -> Self {
        let cart = load_cart(&storage);
        debug!(
            lines = cart.len(),
            total_quantity = cart.total_quantity(),
            "Cart loaded"
        );
        Self { storage, ids, cart }
    }

    /// Add one unit of a product, deduplicating by name, then persist.
    pub fn add(&mut self, candidate: CandidateItem) {
        let outcome = self.cart.add(candidate, &mut self.ids);
        match &outcome {
            AddOutcome::Inserted(id) => debug!(%id, "Line item added"),
            AddOutcome::Incremented { id, quantity } => {
                debug!(%id, quantity = quantity.get(), "Line item incremented");
            }
        }
        self.persist();
    }

    /// Remove a line item, then persist. Unknown ids are ignored.
    pub fn remove(&mut self, id: &LineItemId) {
        match self.cart.remove(id) {
            Some(item) => debug!(%id, name = %item.name, "Line item removed"),
            None => debug!(%id, "Remove ignored, no such line item"),
        }
        self.persist();
    }

    /// Set a line item's quantity, then persist. Zero or below removes it.
    pub fn set_quantity(&mut self, id: &LineItemId, quantity: i64) {
        match self.cart.set_quantity(id, quantity) {
            QuantityChange::Updated(quantity) => {
                debug!(%id, quantity = quantity.get(), "Quantity updated");
            }
            QuantityChange::Removed(_) => debug!(%id, "Quantity dropped to zero, removed"),
            QuantityChange::NotFound => debug!(%id, "Update ignored, no such line item"),
        }
        self.persist();
    }

    /// Sum of quantities, computed from current state.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.cart.total_quantity()
    }

    /// Sum of `price * quantity`, or `None` on decimal overflow.
    #[must_use]
    pub fn subtotal(&self) -> Option<Decimal> {
        self.cart.subtotal()
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) {
        let encoded = match self.cart.to_json() {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "Failed to encode cart, not persisted");
                return;
            }
        };

        if let Err(e) = self.storage.save(&encoded) {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}

fn load_cart<S: CartStorage>(storage: &S) -> Cart {
    let raw = match storage.load() {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read stored cart, starting empty");
            return Cart::new();
        }
    };

    match Cart::from_json(&raw) {
        Ok((cart, 0)) => cart,
        Ok((cart, dropped)) => {
            warn!(dropped, "Stored cart had duplicate line ids, kept the first of each");
            cart
        }
        Err(e) => {
            warn!(error = %e, "Stored cart is corrupt, starting empty");
            Cart::new()
        }
    }
}
