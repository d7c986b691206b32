//! Trolley
//!
//! Trolley is the cart-aggregation and checkout core of a small storefront:
//! it merges selections by item and variant identity, clamps quantities to
//! available stock, persists every mutation as a single atomic snapshot,
//! and derives the payment and messaging payloads for checkout.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod fixtures;
pub mod prelude;
pub mod prices;
pub mod store;
