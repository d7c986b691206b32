//! Checkout
//!
//! Derives the ephemeral checkout payload from a cart snapshot: the order
//! identifier, the item manifest for the payment collaborator and the
//! human-readable order summary. Building a payload never mutates the
//! cart; clearing it is an explicit step the flow performs only after the
//! external call succeeds.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine},
    checkout::flow::PaymentLinkError,
    prices::Price,
    store::CartStore,
};

pub mod flow;
pub mod message;

/// Order-id prefix for the storefront.
pub const ORDER_PREFIX: &str = "PF";

/// Errors related to checkout payload construction and flow transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout attempted with no cart lines.
    #[error("cart is empty")]
    EmptyCart,

    /// Customer name was blank after trimming.
    #[error("customer name is required")]
    MissingCustomerName,

    /// A previous checkout attempt is still awaiting confirmation.
    #[error("a checkout attempt is already in progress")]
    CheckoutInProgress,

    /// No checkout attempt is awaiting confirmation.
    #[error("no checkout attempt is awaiting confirmation")]
    NotInProgress,

    /// Opaque failure passed through from the payment-link collaborator.
    #[error(transparent)]
    ExternalService(#[from] PaymentLinkError),
}

/// A practically-unique order identifier derived from the current time.
///
/// No cross-process coordination is attempted; within one storefront
/// deployment the collision probability of a prefix plus millisecond
/// timestamp is accepted as negligible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OrderId(String);

impl OrderId {
    /// Generates a fresh order id from the prefix and the current time.
    #[must_use]
    pub fn generate(prefix: &str) -> Self {
        OrderId(format!("{prefix}{}", chrono::Utc::now().timestamp_millis()))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flat per-line record sent to the payment collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// Catalog identifier.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Requested quantity.
    pub quantity: u32,

    /// Snapshot offer price per unit.
    pub unit_price: Price,

    /// Selected variant label, if any.
    pub variant: Option<String>,
}

impl ManifestEntry {
    fn from_line(line: &CartLine) -> Self {
        ManifestEntry {
            id: line.item.id.clone(),
            title: line.item.title.clone(),
            quantity: line.quantity(),
            unit_price: line.item.offer_price,
            variant: line.variant.clone(),
        }
    }
}

/// The derived bundle of data needed to initiate payment and notify the
/// customer. Constructed fresh on each checkout attempt, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPayload {
    /// Fresh time-derived order identifier.
    pub order_id: OrderId,

    /// Customer name, trimmed.
    pub customer_name: String,

    /// Sum of offer price times quantity over all lines.
    pub total_amount: Price,

    /// One flat record per cart line, in insertion order.
    pub manifest: Vec<ManifestEntry>,

    /// Human-readable line-per-item order summary.
    pub summary_text: String,
}

/// Derive a checkout payload from the cart's current state.
///
/// Read-only with respect to the cart: repeated calls on an unchanged
/// cart agree on the total, manifest and summary, and differ at most in
/// the order id.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`]: the cart has no lines.
/// - [`CheckoutError::MissingCustomerName`]: the name is blank after trimming.
pub fn build_payload<S: CartStore>(
    cart: &Cart<S>,
    customer_name: &str,
) -> Result<CheckoutPayload, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let customer_name = customer_name.trim();
    if customer_name.is_empty() {
        return Err(CheckoutError::MissingCustomerName);
    }

    Ok(CheckoutPayload {
        order_id: OrderId::generate(ORDER_PREFIX),
        customer_name: customer_name.to_string(),
        total_amount: cart.total_price(),
        manifest: cart.iter().map(ManifestEntry::from_line).collect(),
        summary_text: summary_text(cart.lines()),
    })
}

/// Render the line-per-item summary, one line per cart entry formatted as
/// `<title>[ (<variant>)] x <quantity> = <amount>`.
fn summary_text(lines: &[CartLine]) -> String {
    lines
        .iter()
        .map(summary_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn summary_line(line: &CartLine) -> String {
    let variant = line
        .variant
        .as_deref()
        .map(|label| format!(" ({label})"))
        .unwrap_or_default();

    format!(
        "{title}{variant} x {quantity} = {total}",
        title = line.item.title,
        quantity = line.quantity(),
        total = line.line_total(),
    )
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{fixtures, store::MemoryStore};

    use super::*;

    fn two_line_cart() -> Cart<MemoryStore> {
        let mut cart = Cart::load(MemoryStore::new());

        for (item, variant) in [
            (fixtures::plush_bear(), Some("Brown")),
            (fixtures::stacking_rings(), None),
        ] {
            if let Err(err) = cart.add_item(&item, variant) {
                panic!("fixture items should be addable: {err}");
            }
        }

        cart
    }

    #[test]
    fn order_id_carries_the_prefix() {
        let order_id = OrderId::generate(ORDER_PREFIX);

        assert!(order_id.as_str().starts_with("PF"));
        assert!(order_id.as_str().len() > ORDER_PREFIX.len());
    }

    #[test]
    fn build_payload_trims_customer_name() -> TestResult {
        let cart = two_line_cart();

        let payload = build_payload(&cart, "  Alice  ")?;

        assert_eq!(payload.customer_name, "Alice");

        Ok(())
    }

    #[test]
    fn build_payload_rejects_empty_cart() {
        let cart: Cart<MemoryStore> = Cart::load(MemoryStore::new());

        let result = build_payload(&cart, "Alice");

        assert_eq!(result, Err(CheckoutError::EmptyCart));
    }

    #[test]
    fn build_payload_rejects_blank_name() {
        let cart = two_line_cart();

        let result = build_payload(&cart, "   ");

        assert_eq!(result, Err(CheckoutError::MissingCustomerName));
    }

    #[test]
    fn manifest_preserves_insertion_order() -> TestResult {
        let cart = two_line_cart();

        let payload = build_payload(&cart, "Alice")?;

        let ids: Vec<&str> = payload
            .manifest
            .iter()
            .map(|entry| entry.id.as_str())
            .collect();

        assert_eq!(ids, ["toy-bear", "toy-rings"]);

        Ok(())
    }

    #[test]
    fn total_amount_matches_the_cart() -> TestResult {
        let cart = two_line_cart();

        let payload = build_payload(&cart, "Alice")?;

        assert_eq!(payload.total_amount, cart.total_price());

        Ok(())
    }

    #[test]
    fn summary_lists_one_line_per_entry() -> TestResult {
        let cart = two_line_cart();

        let payload = build_payload(&cart, "Alice")?;

        assert_eq!(
            payload.summary_text,
            "Plush Bear (Brown) x 1 = ₹499.00\nStacking Rings x 1 = ₹299.00"
        );

        Ok(())
    }
}
