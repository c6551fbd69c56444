//! ASO Cart Core - Cart types and the cart state machine.
//!
//! This crate provides the types shared by every ASO cart component:
//! - `storefront` - Persisting cart store, page bindings, notifications
//! - `cli` - Command-line driver for a file-backed cart
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure state transitions - no
//! I/O, no storage access, no rendering. Persistence is layered on top by the
//! storefront crate, which serializes the [`Cart`] after every mutation.
//!
//! # Modules
//!
//! - [`types`] - Newtypes for line-item ids and prices, line items, id generators
//! - [`cart`] - The ordered, name-deduplicated cart and its JSON encoding

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{AddOutcome, Cart, CodecError, QuantityChange};
pub use types::*;
