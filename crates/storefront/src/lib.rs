//! ASO Cart Storefront library.
//!
//! Persisting cart store and the storefront page bindings around it.
//!
//! # Architecture
//!
//! - [`store::CartStore`] keeps the cart in memory and overwrites injected
//!   [`storage::CartStorage`] after every mutation
//! - [`page::StorefrontPage`] binds each interaction to one handler and keeps
//!   the count badge and notifications in step with the store
//! - Askama templates render the badge and notifications
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use aso_cart_storefront::notification::NotificationTray;
//! use aso_cart_storefront::page::StorefrontPage;
//! use aso_cart_storefront::scrape::ProductCard;
//! use aso_cart_storefront::storage::MemoryStorage;
//! use aso_cart_storefront::store::CartStore;
//!
//! let storage = MemoryStorage::new();
//! let store = CartStore::initialize(storage.clone());
//! let mut page = StorefrontPage::new(store, NotificationTray::new(Duration::from_secs(5)));
//!
//! let card = ProductCard::new(Some("Caftan A".into()), Some("MAD 1000".into()), None);
//! page.on_add_to_cart(&card);
//! page.on_add_to_cart(&card);
//!
//! assert_eq!(page.badge().count, 2);
//! assert_eq!(page.store().items().len(), 1);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod ids;
pub mod notification;
pub mod page;
pub mod scrape;
pub mod storage;
pub mod store;
pub mod views;

pub use config::CartConfig;
pub use error::{AppError, Result};
pub use page::StorefrontPage;
pub use store::CartStore;
