//! Billing domain: subscription state, provider events, and webhook
//! authentication.

mod errors;
mod event;
mod ordering;
mod status;
mod verifier;

pub use errors::WebhookError;
pub use event::{
    BillingEvent, BillingEventData, BillingEventType, PriceRef, SubscriptionItem,
    SubscriptionItems, SubscriptionObject, ORGANIZATION_METADATA_KEY,
};
pub use ordering::OrderingKey;
pub use status::SubscriptionStatus;
pub use verifier::{compute_signature_hex, SignatureHeader, WebhookVerifier};
