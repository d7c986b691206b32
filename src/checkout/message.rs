//! Order Messages
//!
//! Composes the plaintext order notification handed off to the external
//! chat composer, and the URL escaping needed to embed it in a share
//! link. Section order is fixed: store header, customer name, order
//! details, total, order id, payment link, timestamp.

use urlencoding::encode;

use crate::checkout::{CheckoutPayload, flow::PaymentLink};

/// Compose the order notification message for the messaging handoff.
pub fn order_message(store_name: &str, payload: &CheckoutPayload, link: &PaymentLink) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

    format!(
        "*New Order from {store_name}*\n\n\
         *Customer Name:* {customer}\n\n\
         *Order Details:*\n{details}\n\n\
         *Total Amount:* {total}\n\
         *Order ID:* {order_id}\n\n\
         *Pay securely here:*\n{link}\n\n\
         *Timestamp:* {timestamp}",
        customer = payload.customer_name,
        details = payload.summary_text,
        total = payload.total_amount,
        order_id = payload.order_id,
        link = link.as_str(),
    )
}

/// Percent-escape a message for embedding in a URL query parameter.
pub fn encode_for_url(message: &str) -> String {
    encode(message).into_owned()
}

/// Build a `wa.me` share link carrying the escaped message.
pub fn share_link(phone: &str, message: &str) -> String {
    format!("https://wa.me/{phone}?text={}", encode(message))
}
