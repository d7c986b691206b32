//! Cart
//!
//! The cart aggregator owns the ordered list of selected lines, merges
//! duplicate selections by identity key, clamps quantities to the stock
//! snapshotted at add time and keeps the storage slot in sync with every
//! completed mutation.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{
    catalog::CatalogItem,
    prices::Price,
    store::{CART_KEY, CartStore},
};

/// Errors related to cart mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The catalog item has no stock, so no line can be created.
    #[error("item {0} is out of stock")]
    OutOfStock(String),

    /// The requested variant label is not offered by the catalog item.
    #[error("item {0} has no variant {1:?}")]
    UnknownVariant(String, String),
}

/// Identity key of a cart line: catalog id plus selected variant.
///
/// Two lines with the same key are the same logical entry and never
/// coexist in a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey<'a> {
    /// Catalog identifier.
    pub id: &'a str,

    /// Selected variant label, if any.
    pub variant: Option<&'a str>,
}

/// One distinct selection: a catalog snapshot, a variant and a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog snapshot taken at add time. Prices and the stock bound do
    /// not track later catalog updates within a session.
    pub item: CatalogItem,

    /// Selected colour variant, when the item offers variants.
    pub variant: Option<String>,

    quantity: u32,
}

impl CartLine {
    fn new(item: CatalogItem, variant: Option<&str>) -> Self {
        CartLine {
            item,
            variant: variant.map(ToString::to_string),
            quantity: 1,
        }
    }

    /// Requested quantity, always at least 1 and at most the snapshot stock.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Identity key of the line.
    pub fn key(&self) -> LineKey<'_> {
        LineKey {
            id: &self.item.id,
            variant: self.variant.as_deref(),
        }
    }

    /// Snapshot offer price multiplied by the requested quantity.
    pub fn line_total(&self) -> Price {
        self.item.offer_price.saturating_mul(self.quantity)
    }

    fn matches(&self, id: &str, variant: Option<&str>) -> bool {
        self.item.id == id && self.variant.as_deref() == variant
    }
}

/// Cart
///
/// Generic over the [`CartStore`] the serialized state is persisted into.
/// Every mutating operation writes the whole state to the store as a
/// single snapshot before returning; a write failure is reported through
/// [`warn`] and never fails the in-memory operation.
#[derive(Debug)]
pub struct Cart<S> {
    lines: Vec<CartLine>,
    store: S,
}

impl<S: CartStore> Cart<S> {
    /// Restore the persisted cart from the store, or start empty.
    ///
    /// A missing slot means a first load. An unreadable slot or snapshot
    /// is discarded with a warning rather than failing the session.
    pub fn load(store: S) -> Self {
        let lines = match store.get(CART_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(lines) => lines,
                Err(err) => {
                    warn!(%err, "discarding unreadable cart snapshot");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(%err, "cart storage unavailable, starting empty");
                Vec::new()
            }
        };

        Cart { lines, store }
    }

    /// Add one unit of a catalog item to the cart.
    ///
    /// An existing line with the same identity key has its quantity
    /// incremented, clamped to the stock snapshotted on that line; a call
    /// at the clamp is a silent no-op. Otherwise a new line with quantity
    /// 1 is appended, preserving insertion order.
    ///
    /// # Errors
    ///
    /// - [`CartError::OutOfStock`]: the item has zero stock and no line exists.
    /// - [`CartError::UnknownVariant`]: the variant label is not offered by the item.
    pub fn add_item(&mut self, item: &CatalogItem, variant: Option<&str>) -> Result<(), CartError> {
        if let Some(label) = variant {
            if !item.has_variant(label) {
                return Err(CartError::UnknownVariant(
                    item.id.clone(),
                    label.to_string(),
                ));
            }
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(&item.id, variant))
        {
            if line.quantity < line.item.quantity {
                line.quantity = line.quantity.saturating_add(1);
            }

            self.persist();

            return Ok(());
        }

        if !item.in_stock() {
            return Err(CartError::OutOfStock(item.id.clone()));
        }

        self.lines.push(CartLine::new(item.clone(), variant));
        self.persist();

        Ok(())
    }

    /// Set the requested quantity of the matching line.
    ///
    /// A quantity of zero removes the line; a quantity above the line's
    /// snapshot stock is clamped to it. Setting the quantity of an absent
    /// line is a silent no-op, because the UI may race a display refresh
    /// against a fast double-click.
    pub fn set_quantity(&mut self, id: &str, variant: Option<&str>, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id, variant);
            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(id, variant))
        {
            line.quantity = quantity.min(line.item.quantity);
        }

        self.persist();
    }

    /// Remove the matching line if present; idempotent.
    pub fn remove_item(&mut self, id: &str, variant: Option<&str>) {
        self.lines.retain(|line| !line.matches(id, variant));
        self.persist();
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// Total requested quantity across all lines.
    pub fn total_items(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Total price across all lines, using each line's snapshot offer price.
    pub fn total_price(&self) -> Price {
        self.lines
            .iter()
            .fold(Price::ZERO, |acc, line| acc.saturating_add(line.line_total()))
    }

    /// Find the line with the given identity key.
    pub fn line(&self, id: &str, variant: Option<&str>) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.matches(id, variant))
    }

    /// The cart lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the cart lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Number of distinct lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write the whole serialized state to the store as one snapshot.
    fn persist(&mut self) {
        let serialized = match serde_json::to_string(&self.lines) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!(%err, "failed to serialize cart state");
                return;
            }
        };

        if let Err(err) = self.store.set(CART_KEY, &serialized) {
            warn!(%err, "failed to persist cart state");
        }
    }
}
