//! Display data and templates for the cart badge and cart listing.

use askama::Template;
use aso_cart_core::{Cart, LineItem};
use rust_decimal::Decimal;
use serde::Serialize;

/// Cart count badge fragment.
///
/// Holds the count last rendered; the page calls [`CartCountBadge::refresh`]
/// after every mutation so it tracks the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Template)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountBadge {
    pub count: u64,
}

impl CartCountBadge {
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self { count }
    }

    /// Replace the displayed count.
    pub const fn refresh(&mut self, count: u64) {
        self.count = count;
    }
}

/// Cart item display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: format_price(Decimal::ZERO),
            item_count: 0,
        }
    }
}

/// Shown in place of a total too large for a decimal.
pub const TOTAL_OUT_OF_RANGE: &str = "MAD (out of range)";

/// Format an amount the way the product cards show it.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    format!("MAD {:.2}", amount.round_dp(2))
}

/// Format a derived total, which is `None` when it overflowed.
#[must_use]
pub fn format_total(total: Option<Decimal>) -> String {
    total.map_or_else(|| TOTAL_OUT_OF_RANGE.to_string(), format_price)
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: format_total(cart.subtotal()),
            item_count: cart.total_quantity(),
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity.get(),
            price: format_price(item.price.amount()),
            line_price: format_total(item.line_total()),
        }
    }
}
