//! Reading add-to-cart candidates off a product card.
//!
//! A product card shows a name heading, a price heading such as `MAD 1,200`
//! and an image. Any of them may be missing from the markup; the add still
//! goes through with fixed fallbacks.

use aso_cart_core::{CandidateItem, Price};
use tracing::debug;

/// Name used when a card has no name element, or its text is empty.
pub const FALLBACK_NAME: &str = "ASO's Moroccan Caftan";
/// Price text used when a card has no price element, or its text has no digits.
pub const FALLBACK_PRICE_TEXT: &str = "10000";

/// Text content scraped from one product card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCard {
    pub name_text: Option<String>,
    pub price_text: Option<String>,
    pub image_src: Option<String>,
}

impl ProductCard {
    #[must_use]
    pub fn new(
        name_text: Option<String>,
        price_text: Option<String>,
        image_src: Option<String>,
    ) -> Self {
        Self {
            name_text,
            price_text,
            image_src,
        }
    }

    /// Build the candidate an add-to-cart click on this card supplies.
    #[must_use]
    pub fn to_candidate(&self) -> CandidateItem {
        let name = self
            .name_text
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_NAME);
        let price = scrape_price(self.price_text.as_deref());
        let image = self.image_src.clone().unwrap_or_default();

        CandidateItem::new(name, price, image)
    }
}

/// Read a price from displayed text.
///
/// Strips everything but digits and `.`; an empty result falls back to
/// [`FALLBACK_PRICE_TEXT`]. Text that keeps only points (`"MAD ."`) has no
/// readable number and is priced at zero.
#[must_use]
pub fn scrape_price(text: Option<&str>) -> Price {
    let cleaned = text.map(Price::clean_display_text).unwrap_or_default();
    let cleaned = if cleaned.is_empty() {
        FALLBACK_PRICE_TEXT
    } else {
        cleaned.as_str()
    };

    Price::parse_leading(cleaned).unwrap_or_else(|e| {
        debug!(error = %e, "Unreadable price, using zero");
        Price::ZERO
    })
}
