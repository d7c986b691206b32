//! Fixtures
//!
//! Canned catalog records used by tests and demos.

use smallvec::smallvec;

use crate::{
    catalog::{CatalogItem, MemoryCatalog},
    prices::Price,
};

/// A soft toy with two colour variants and healthy stock.
pub fn plush_bear() -> CatalogItem {
    CatalogItem {
        id: "toy-bear".to_string(),
        title: "Plush Bear".to_string(),
        category: "Soft Toys".to_string(),
        original_price: Price::from_major(599),
        offer_price: Price::from_major(499),
        images: smallvec!["bear-front.jpg".to_string(), "bear-side.jpg".to_string()],
        variants: smallvec!["Brown".to_string(), "White".to_string()],
        quantity: 5,
    }
}

/// A variant-free stacking toy with limited stock.
pub fn stacking_rings() -> CatalogItem {
    CatalogItem {
        id: "toy-rings".to_string(),
        title: "Stacking Rings".to_string(),
        category: "Stacking Toys".to_string(),
        original_price: Price::from_major(399),
        offer_price: Price::from_major(299),
        images: smallvec!["rings.jpg".to_string()],
        variants: smallvec![],
        quantity: 3,
    }
}

/// A sold-out item.
pub fn sold_out_drone() -> CatalogItem {
    CatalogItem {
        id: "toy-drone".to_string(),
        title: "Camera Drone".to_string(),
        category: "Outdoor".to_string(),
        original_price: Price::from_major(2999),
        offer_price: Price::from_major(2499),
        images: smallvec!["drone.jpg".to_string()],
        variants: smallvec![],
        quantity: 0,
    }
}

/// The full fixture catalog.
pub fn catalog() -> MemoryCatalog {
    MemoryCatalog::from_items([plush_bear(), stacking_rings(), sold_out_drone()])
}
