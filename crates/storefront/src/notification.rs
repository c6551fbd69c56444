//! "Added to cart" notifications.
//!
//! Each successful add shows a notification naming the product, with a
//! **View Cart** action that navigates to the cart page and a **Continue
//! Shopping** action that dismisses it. Notifications dismiss themselves after
//! a fixed delay. They never read or write cart state.
//!
//! Auto-dismiss is fire-and-forget: a task on the current tokio runtime sleeps
//! for the delay, then drops the notification from the tray if it is still
//! there. Outside a runtime the notification stays up until dismissed.

use core::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use askama::Template;
use tokio::runtime::Handle;
use tracing::debug;

/// Path of the dedicated cart page.
pub const CART_PAGE_PATH: &str = "cart.html";

/// Where an interaction sends the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    CartPage,
}

impl Navigation {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::CartPage => CART_PAGE_PATH,
        }
    }
}

/// Buttons on a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    ViewCart,
    ContinueShopping,
}

/// Identifies one shown notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A visible "added to cart" notification.
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "partials/cart_notification.html")]
pub struct CartNotification {
    pub id: NotificationId,
    pub product_name: String,
    pub cart_path: &'static str,
}

impl CartNotification {
    /// Plain-text message, for surfaces that do not render HTML.
    #[must_use]
    pub fn message(&self) -> String {
        format!("{} added to cart!", self.product_name)
    }
}

type Visible = Arc<Mutex<Vec<CartNotification>>>;

/// The set of notifications currently on screen.
#[derive(Debug)]
pub struct NotificationTray {
    visible: Visible,
    next_id: u64,
    dismiss_after: Duration,
}

impl NotificationTray {
    /// Create an empty tray whose notifications auto-dismiss after `dismiss_after`.
    #[must_use]
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            visible: Arc::default(),
            next_id: 0,
            dismiss_after,
        }
    }

    #[must_use]
    pub const fn dismiss_after(&self) -> Duration {
        self.dismiss_after
    }

    /// Show a notification for `product_name` and schedule its dismissal.
    pub fn show(&mut self, product_name: impl Into<String>) -> NotificationId {
        self.next_id += 1;
        let id = NotificationId(self.next_id);

        lock(&self.visible).push(CartNotification {
            id,
            product_name: product_name.into(),
            cart_path: CART_PAGE_PATH,
        });

        match Handle::try_current() {
            Ok(runtime) => {
                let visible = Arc::clone(&self.visible);
                let delay = self.dismiss_after;
                runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    if remove(&visible, id) {
                        debug!(%id, "Notification auto-dismissed");
                    }
                });
            }
            Err(_) => debug!(%id, "No runtime, notification stays until dismissed"),
        }

        id
    }

    /// Remove a notification. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        remove(&self.visible, id)
    }

    /// Apply a button press.
    ///
    /// Both actions take the notification down; **View Cart** also navigates.
    pub fn handle_action(
        &self,
        id: NotificationId,
        action: NotificationAction,
    ) -> Option<Navigation> {
        self.dismiss(id);
        match action {
            NotificationAction::ViewCart => Some(Navigation::CartPage),
            NotificationAction::ContinueShopping => None,
        }
    }

    #[must_use]
    pub fn is_visible(&self, id: NotificationId) -> bool {
        lock(&self.visible).iter().any(|n| n.id == id)
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<CartNotification> {
        lock(&self.visible).iter().find(|n| n.id == id).cloned()
    }

    /// Snapshot of visible notifications, oldest first.
    #[must_use]
    pub fn visible(&self) -> Vec<CartNotification> {
        lock(&self.visible).clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.visible).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.visible).is_empty()
    }
}

fn lock(visible: &Visible) -> MutexGuard<'_, Vec<CartNotification>> {
    visible.lock().unwrap_or_else(PoisonError::into_inner)
}

fn remove(visible: &Visible, id: NotificationId) -> bool {
    let mut visible = lock(visible);
    let before = visible.len();
    visible.retain(|n| n.id != id);
    visible.len() != before
}
