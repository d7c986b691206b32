//! Checkout Flow
//!
//! Drives one checkout attempt over the cart: `Idle` until [`begin`]
//! builds a payload, then awaiting external confirmation until
//! [`confirm`] resolves the attempt or [`abandon`] drops it. Only a
//! successful confirmation clears the cart; a failure or an abandoned
//! attempt returns to `Idle` with every selection retained, so the user
//! can re-attempt without re-entering anything. The flow never retries
//! the collaborator itself.
//!
//! [`begin`]: CheckoutFlow::begin
//! [`confirm`]: CheckoutFlow::confirm
//! [`abandon`]: CheckoutFlow::abandon

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    cart::Cart,
    checkout::{CheckoutError, CheckoutPayload, ManifestEntry, build_payload},
    prices::Price,
    store::CartStore,
};

/// Opaque failure passed through from the payment-link collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("payment link service failed: {0}")]
pub struct PaymentLinkError(
    /// Collaborator-provided failure description.
    pub String,
);

/// A short shareable payment link returned by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentLink(String);

impl PaymentLink {
    /// Creates a payment link from the collaborator's response.
    #[must_use]
    pub fn new(link: impl Into<String>) -> Self {
        PaymentLink(link.into())
    }

    /// The link as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Request body for the payment-link collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    /// Amount to collect, in minor units.
    pub amount: Price,

    /// Trimmed customer name.
    pub customer_name: String,

    /// Order identifier the link is created against.
    pub order_id: String,

    /// Per-line manifest, in cart insertion order.
    pub items: Vec<ManifestEntry>,
}

/// Creates short shareable payment links.
///
/// Retry and backoff policy belongs to the implementation or its caller,
/// never to the checkout flow.
pub trait PaymentLinkService {
    /// Create a payment link for the given request.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentLinkError`] describing the collaborator failure.
    fn create_payment_link(&self, request: &PaymentRequest) -> Result<PaymentLink, PaymentLinkError>;
}

/// Outcome of a confirmed checkout: the payload that was paid for and the
/// shareable link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    /// The payload the attempt was built from.
    pub payload: CheckoutPayload,

    /// The collaborator's payment link.
    pub link: PaymentLink,
}

/// Checkout flow state machine.
///
/// `pending` is `None` while idle and holds the built payload while the
/// attempt awaits external confirmation.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    pending: Option<CheckoutPayload>,
}

impl CheckoutFlow {
    /// Creates an idle flow.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no attempt is awaiting confirmation.
    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    /// Build the payload for a new attempt and await confirmation.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::CheckoutInProgress`]: an attempt is already pending.
    /// - [`CheckoutError::EmptyCart`], [`CheckoutError::MissingCustomerName`]:
    ///   payload construction failed; the flow stays idle.
    pub fn begin<S: CartStore>(
        &mut self,
        cart: &Cart<S>,
        customer_name: &str,
    ) -> Result<&CheckoutPayload, CheckoutError> {
        if self.pending.is_some() {
            return Err(CheckoutError::CheckoutInProgress);
        }

        let payload = build_payload(cart, customer_name)?;
        info!(order_id = %payload.order_id, "checkout started");

        Ok(self.pending.insert(payload))
    }

    /// The request body for the payment-link collaborator, if an attempt
    /// is pending.
    pub fn payment_request(&self) -> Option<PaymentRequest> {
        self.pending.as_ref().map(|payload| PaymentRequest {
            amount: payload.total_amount,
            customer_name: payload.customer_name.clone(),
            order_id: payload.order_id.to_string(),
            items: payload.manifest.clone(),
        })
    }

    /// Resolve the pending attempt with the collaborator's outcome.
    ///
    /// Success clears the cart and yields the receipt. Failure returns
    /// the flow to idle with the cart untouched; re-attempting is the
    /// caller's decision, never automatic.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::NotInProgress`]: nothing was awaiting confirmation.
    /// - [`CheckoutError::ExternalService`]: the collaborator failed.
    pub fn confirm<S: CartStore>(
        &mut self,
        cart: &mut Cart<S>,
        outcome: Result<PaymentLink, PaymentLinkError>,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let Some(payload) = self.pending.take() else {
            return Err(CheckoutError::NotInProgress);
        };

        match outcome {
            Ok(link) => {
                info!(order_id = %payload.order_id, "checkout confirmed, clearing cart");
                cart.clear();

                Ok(CheckoutReceipt { payload, link })
            }
            Err(err) => {
                warn!(order_id = %payload.order_id, %err, "checkout failed, cart retained");

                Err(CheckoutError::ExternalService(err))
            }
        }
    }

    /// Abandon the pending attempt, leaving the cart unmodified.
    pub fn abandon(&mut self) {
        if let Some(payload) = self.pending.take() {
            info!(order_id = %payload.order_id, "checkout abandoned");
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{fixtures, store::MemoryStore};

    use super::*;

    fn cart_with_rings() -> Cart<MemoryStore> {
        let mut cart = Cart::load(MemoryStore::new());

        if let Err(err) = cart.add_item(&fixtures::stacking_rings(), None) {
            panic!("fixture item should be addable: {err}");
        }

        cart
    }

    #[test]
    fn begin_twice_reports_an_attempt_in_progress() -> TestResult {
        let cart = cart_with_rings();
        let mut flow = CheckoutFlow::new();

        flow.begin(&cart, "Alice")?;

        assert_eq!(
            flow.begin(&cart, "Alice").err(),
            Some(CheckoutError::CheckoutInProgress)
        );

        Ok(())
    }

    #[test]
    fn begin_failure_leaves_the_flow_idle() {
        let cart = cart_with_rings();
        let mut flow = CheckoutFlow::new();

        assert_eq!(flow.begin(&cart, "   ").err(), Some(CheckoutError::MissingCustomerName));
        assert!(flow.is_idle());
    }

    #[test]
    fn payment_request_mirrors_the_payload() -> TestResult {
        let cart = cart_with_rings();
        let mut flow = CheckoutFlow::new();

        let payload = flow.begin(&cart, "Alice")?.clone();
        let request = flow.payment_request();

        let Some(request) = request else {
            panic!("expected a pending payment request");
        };

        assert_eq!(request.amount, payload.total_amount);
        assert_eq!(request.customer_name, "Alice");
        assert_eq!(request.order_id, payload.order_id.to_string());
        assert_eq!(request.items, payload.manifest);

        Ok(())
    }

    #[test]
    fn confirm_without_begin_is_rejected() {
        let mut cart = cart_with_rings();
        let mut flow = CheckoutFlow::new();

        let result = flow.confirm(&mut cart, Ok(PaymentLink::new("https://rzp.io/l/x")));

        assert_eq!(result, Err(CheckoutError::NotInProgress));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn successful_confirmation_clears_the_cart() -> TestResult {
        let mut cart = cart_with_rings();
        let mut flow = CheckoutFlow::new();

        flow.begin(&cart, "Alice")?;
        let receipt = flow.confirm(&mut cart, Ok(PaymentLink::new("https://rzp.io/l/x")))?;

        assert!(cart.is_empty());
        assert!(flow.is_idle());
        assert_eq!(receipt.link.as_str(), "https://rzp.io/l/x");
        assert_eq!(receipt.payload.customer_name, "Alice");

        Ok(())
    }

    #[test]
    fn failed_confirmation_retains_the_cart() -> TestResult {
        let mut cart = cart_with_rings();
        let mut flow = CheckoutFlow::new();

        flow.begin(&cart, "Alice")?;

        let err = PaymentLinkError("gateway unavailable".to_string());
        let result = flow.confirm(&mut cart, Err(err.clone()));

        assert_eq!(result, Err(CheckoutError::ExternalService(err)));
        assert_eq!(cart.len(), 1);
        assert!(flow.is_idle());

        Ok(())
    }

    #[test]
    fn abandoning_an_attempt_retains_the_cart() -> TestResult {
        let mut cart = cart_with_rings();
        let mut flow = CheckoutFlow::new();

        flow.begin(&cart, "Alice")?;
        flow.abandon();

        assert!(flow.is_idle());
        assert_eq!(cart.len(), 1);
        assert!(flow.payment_request().is_none());

        // The user can re-attempt immediately with the cart intact.
        flow.begin(&cart, "Alice")?;
        let _receipt = flow.confirm(&mut cart, Ok(PaymentLink::new("https://rzp.io/l/y")))?;

        assert!(cart.is_empty());

        Ok(())
    }
}
