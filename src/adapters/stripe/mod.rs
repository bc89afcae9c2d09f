//! Stripe adapters.
//!
//! Checkout session creation against the Stripe HTTP API. Webhook
//! signature verification lives in `domain::billing::WebhookVerifier`; it
//! is pure and has no API client to adapt.

mod checkout;

pub use checkout::StripeCheckoutGateway;
