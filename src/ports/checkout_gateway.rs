//! Checkout gateway port.
//!
//! Contract for starting a hosted checkout flow with the billing provider.
//! The organization id travels as opaque metadata on the provider session
//! so the eventual webhook can be attributed back without a lookup table;
//! no local state is written when a checkout starts. The ledger is only
//! ever mutated by the webhook ingestor, keeping a single writer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::OrganizationId;

/// Request to create a hosted checkout session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutRequest {
    /// Organization the resulting subscription will belong to. Carried as
    /// metadata on the provider session.
    pub organization_id: OrganizationId,

    /// Provider price id for the plan being purchased.
    pub price_id: String,

    /// URL to redirect after successful checkout.
    pub success_url: String,

    /// URL to redirect after canceled checkout.
    pub cancel_url: String,
}

/// A provider-hosted checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedCheckout {
    /// Provider's session id.
    pub id: String,

    /// URL for the customer to complete checkout.
    pub url: String,
}

/// Errors from the checkout gateway.
#[derive(Debug, Error)]
pub enum CheckoutGatewayError {
    /// Network connectivity issue reaching the provider.
    #[error("Network error: {0}")]
    Network(String),

    /// The provider rejected the request or returned an unusable response.
    #[error("Provider error: {0}")]
    Provider(String),
}

/// Creates checkout sessions with the billing provider.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Create a hosted checkout session and return its URL.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<HostedCheckout, CheckoutGatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_gateway_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn CheckoutGateway>();
    }

    #[test]
    fn hosted_checkout_serializes() {
        let session = HostedCheckout {
            id: "cs_test_1".to_string(),
            url: "https://checkout.stripe.com/c/pay/cs_test_1".to_string(),
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["id"], "cs_test_1");
    }
}
