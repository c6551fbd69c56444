//! Integration tests for the ASO cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p aso-cart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Reloading a file-backed cart, corrupt and foreign state
//! - `storefront_page` - Page event flows, badge refresh, notifications

use std::path::PathBuf;
use std::time::Duration;

use aso_cart_core::SequenceIdGenerator;
use aso_cart_storefront::notification::NotificationTray;
use aso_cart_storefront::storage::FileStorage;
use aso_cart_storefront::{CartStore, StorefrontPage};
use tempfile::TempDir;

/// Storage key used by every test page.
pub const STORAGE_KEY: &str = "cart";

/// Page type the tests drive.
pub type TestPage = StorefrontPage<FileStorage, SequenceIdGenerator>;

/// A temporary directory holding one emulated local-storage file.
///
/// Every [`TestContext::load_page`] call is a fresh page load over the same
/// file, with a fresh id sequence.
pub struct TestContext {
    dir: TempDir,
    pub dismiss_after: Duration,
}

impl TestContext {
    /// Create a context with an empty storage directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            dismiss_after: Duration::from_secs(5),
        }
    }

    /// Path of the storage file.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.dir.path().join("local-storage.json")
    }

    /// Storage handle for the cart key.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.storage_path(), STORAGE_KEY)
    }

    /// Load a store directly, without page bindings.
    #[must_use]
    pub fn load_store(&self) -> CartStore<FileStorage, SequenceIdGenerator> {
        CartStore::with_id_generator(self.storage(), SequenceIdGenerator::new())
    }

    /// Load a full storefront page.
    #[must_use]
    pub fn load_page(&self) -> TestPage {
        StorefrontPage::new(self.load_store(), NotificationTray::new(self.dismiss_after))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
