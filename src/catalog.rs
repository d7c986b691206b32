//! Catalog

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::prices::Price;

/// A sellable product record with price and stock.
///
/// The cart snapshots the whole record at add time, so prices and the
/// stock bound seen by a session do not track later catalog updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Opaque catalog identifier.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Category label.
    pub category: String,

    /// Price before any offer.
    pub original_price: Price,

    /// Price the customer actually pays.
    pub offer_price: Price,

    /// Image references.
    #[serde(default)]
    pub images: SmallVec<[String; 4]>,

    /// Colour-variant labels; empty when the item has no variants.
    #[serde(default)]
    pub variants: SmallVec<[String; 4]>,

    /// Units available in stock.
    pub quantity: u32,
}

impl CatalogItem {
    /// Returns true if the item offers the given variant label.
    pub fn has_variant(&self, label: &str) -> bool {
        self.variants.iter().any(|variant| variant == label)
    }

    /// Returns true if at least one unit is available.
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

/// A read-only source of catalog records.
pub trait Catalog {
    /// Look up an item by its identifier.
    fn item(&self, id: &str) -> Option<&CatalogItem>;

    /// Iterate over all items.
    fn items(&self) -> impl Iterator<Item = &CatalogItem>;

    /// All distinct category labels, sorted.
    fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.items().map(|item| item.category.as_str()).collect();

        categories.sort_unstable();
        categories.dedup();

        categories
    }
}

/// An in-memory catalog keyed by item identifier.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    items: FxHashMap<String, CatalogItem>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from a list of items.
    ///
    /// A later item with a duplicate identifier replaces the earlier one.
    pub fn from_items(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();

        MemoryCatalog { items }
    }

    /// Inserts or replaces an item.
    pub fn insert(&mut self, item: CatalogItem) {
        self.items.insert(item.id.clone(), item);
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Catalog for MemoryCatalog {
    fn item(&self, id: &str) -> Option<&CatalogItem> {
        self.items.get(id)
    }

    fn items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.values()
    }
}
