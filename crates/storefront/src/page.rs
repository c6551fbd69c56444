//! Storefront page event bindings.
//!
//! One handler per interactive element: the add-to-cart button on a product
//! card, the remove button and quantity input on the cart page, and the cart
//! toggle in the header. Each handler runs to completion, persisting the cart
//! and refreshing the count badge before it returns.

use aso_cart_core::{IdGenerator, LineItemId};
use tracing::{info, instrument};

use crate::ids::RandomIdGenerator;
use crate::notification::{Navigation, NotificationAction, NotificationId, NotificationTray};
use crate::scrape::ProductCard;
use crate::storage::CartStorage;
use crate::store::CartStore;
use crate::views::CartCountBadge;

/// A loaded storefront page: cart store, count badge and notification tray.
#[derive(Debug)]
pub struct StorefrontPage<S, G = RandomIdGenerator> {
    store: CartStore<S, G>,
    badge: CartCountBadge,
    notifications: NotificationTray,
}

impl<S, G> StorefrontPage<S, G>
where
    S: CartStorage,
    G: IdGenerator,
{
    /// Wire up a page over an initialized store. The badge starts at the
    /// loaded cart's total.
    pub fn new(store: CartStore<S, G>, notifications: NotificationTray) -> Self {
        let badge = CartCountBadge::new(store.total_quantity());
        Self {
            store,
            badge,
            notifications,
        }
    }

    /// Add-to-cart click on a product card.
    #[instrument(skip(self), fields(name = ?card.name_text))]
    pub fn on_add_to_cart(&mut self, card: &ProductCard) -> NotificationId {
        let candidate = card.to_candidate();
        let name = candidate.name.clone();

        self.store.add(candidate);
        self.refresh_badge();

        info!(total_quantity = self.badge.count, "Added to cart");
        self.notifications.show(name)
    }

    /// Remove button on the cart page.
    #[instrument(skip(self))]
    pub fn on_remove(&mut self, id: &LineItemId) {
        self.store.remove(id);
        self.refresh_badge();
    }

    /// Quantity change on the cart page.
    #[instrument(skip(self))]
    pub fn on_update_quantity(&mut self, id: &LineItemId, quantity: i64) {
        self.store.set_quantity(id, quantity);
        self.refresh_badge();
    }

    /// Cart toggle in the header.
    #[must_use]
    pub const fn on_cart_toggle(&self) -> Navigation {
        Navigation::CartPage
    }

    /// Button press on a notification.
    pub fn on_notification_action(
        &self,
        id: NotificationId,
        action: NotificationAction,
    ) -> Option<Navigation> {
        self.notifications.handle_action(id, action)
    }

    #[must_use]
    pub const fn store(&self) -> &CartStore<S, G> {
        &self.store
    }

    #[must_use]
    pub const fn badge(&self) -> &CartCountBadge {
        &self.badge
    }

    #[must_use]
    pub const fn notifications(&self) -> &NotificationTray {
        &self.notifications
    }

    fn refresh_badge(&mut self) {
        self.badge.refresh(self.store.total_quantity());
    }
}
