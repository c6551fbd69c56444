//! Core types for the ASO cart.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod id;
pub mod line_item;
pub mod price;

pub use id::*;
pub use line_item::{CandidateItem, LineItem};
pub use price::{Price, PriceError};
