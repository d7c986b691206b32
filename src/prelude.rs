//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine, LineKey},
    catalog::{Catalog, CatalogItem, MemoryCatalog},
    checkout::{
        CheckoutError, CheckoutPayload, ManifestEntry, ORDER_PREFIX, OrderId, build_payload,
        flow::{
            CheckoutFlow, CheckoutReceipt, PaymentLink, PaymentLinkError, PaymentLinkService,
            PaymentRequest,
        },
        message::{encode_for_url, order_message, share_link},
    },
    prices::{Price, STOREFRONT_CURRENCY},
    store::{CART_KEY, CartStore, FileStore, MemoryStore, StoreError},
};
