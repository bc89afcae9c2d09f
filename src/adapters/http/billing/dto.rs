//! Request/response DTOs for billing endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::billing::SubscriptionStatus;

/// Response to a successful checkout start: the provider-hosted URL the
/// browser should be redirected to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub url: String,
}

/// Current billing status of the caller's organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingStatusResponse {
    pub status: SubscriptionStatus,
}

/// Acknowledgement body for accepted webhook deliveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// Generic error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
