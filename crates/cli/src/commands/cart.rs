//! Cart commands over a file-backed storefront page.
//!
//! Each invocation is one page load: the cart is read from the storage file,
//! at most one interaction runs, and the store persists before exit.

#![allow(clippy::print_stdout)]

use askama::Template;
use aso_cart_core::LineItemId;
use aso_cart_storefront::ids::ConfiguredIdGenerator;
use aso_cart_storefront::notification::NotificationTray;
use aso_cart_storefront::scrape::ProductCard;
use aso_cart_storefront::storage::{CartStorage, FileStorage};
use aso_cart_storefront::views::CartView;
use aso_cart_storefront::{CartConfig, CartStore, StorefrontPage};
use tracing::info;

/// The page type every command runs against.
pub type Page = StorefrontPage<FileStorage, ConfiguredIdGenerator>;

/// Load the page from the configured storage file.
pub fn open_page(config: &CartConfig) -> Page {
    let storage = FileStorage::new(&config.storage_path, &config.storage_key);
    info!(
        path = %config.storage_path.display(),
        key = %config.storage_key,
        "Opening cart"
    );

    let ids = ConfiguredIdGenerator::from(config.id_strategy);
    let store = CartStore::with_id_generator(storage, ids);
    StorefrontPage::new(store, NotificationTray::new(config.notification_dismiss_after))
}

/// Add one unit of a product.
pub fn add(page: &mut Page, name: Option<String>, price: Option<String>, image: Option<String>) {
    let card = ProductCard::new(name, price, image);
    let notification = page.on_add_to_cart(&card);

    if let Some(notification) = page.notifications().get(notification) {
        println!("{}", notification.message());
    }
    println!("Cart: {}", page.badge().count);
}

/// Remove a line item.
pub fn remove(page: &mut Page, id: &str) {
    page.on_remove(&LineItemId::new(id));
    println!("Cart: {}", page.badge().count);
}

/// Set a line item's quantity.
pub fn set_quantity(page: &mut Page, id: &str, quantity: i64) {
    page.on_update_quantity(&LineItemId::new(id), quantity);
    println!("Cart: {}", page.badge().count);
}

/// Print the cart contents.
///
/// # Errors
///
/// Returns an error if JSON encoding fails.
pub fn show(page: &Page, json: bool) -> aso_cart_storefront::Result<()> {
    let view = CartView::from(page.store().cart());

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.items.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    for item in &view.items {
        println!(
            "{:<12} {:<32} {:>4} x {:>14} = {:>14}",
            item.id, item.name, item.quantity, item.price, item.line_price
        );
    }
    println!("Items: {}", view.item_count);
    println!("Subtotal: {}", view.subtotal);
    Ok(())
}

/// Print the count badge value, or the rendered badge fragment.
///
/// # Errors
///
/// Returns an error if the badge template fails to render.
pub fn count(page: &Page, html: bool) -> aso_cart_storefront::Result<()> {
    if html {
        println!("{}", page.badge().render()?);
    } else {
        println!("{}", page.badge().count);
    }
    Ok(())
}

/// Print the persisted value as stored.
///
/// # Errors
///
/// Returns an error if the storage file cannot be read.
pub fn raw(page: &Page) -> aso_cart_storefront::Result<()> {
    match page.store().storage().load()? {
        Some(value) => println!("{value}"),
        None => println!("(nothing stored)"),
    }
    Ok(())
}
