//! Stripe checkout gateway adapter.
//!
//! Implements the `CheckoutGateway` port against Stripe's
//! `/v1/checkout/sessions` endpoint. The organization id is attached as
//! session metadata; Stripe copies checkout metadata onto the resulting
//! subscription, which is how the webhook ingestor attributes events back
//! to an organization.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::billing::ORGANIZATION_METADATA_KEY;
use crate::ports::{
    CheckoutGateway, CheckoutGatewayError, CreateCheckoutRequest, HostedCheckout,
};

/// Stripe checkout gateway.
pub struct StripeCheckoutGateway {
    api_key: SecretString,
    api_base_url: String,
    http_client: reqwest::Client,
}

/// Checkout session as returned by the Stripe API.
#[derive(Debug, Deserialize)]
struct StripeCheckoutSession {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

impl StripeCheckoutGateway {
    /// Create a new gateway with the given API key.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            api_base_url: "https://api.stripe.com".to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

#[async_trait]
impl CheckoutGateway for StripeCheckoutGateway {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<HostedCheckout, CheckoutGatewayError> {
        let url = format!("{}/v1/checkout/sessions", self.api_base_url);

        let metadata_key = format!("metadata[{}]", ORGANIZATION_METADATA_KEY);
        let params = [
            ("mode", "subscription".to_string()),
            ("line_items[0][price]", request.price_id),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", request.success_url),
            ("cancel_url", request.cancel_url),
            (metadata_key.as_str(), request.organization_id.to_string()),
            (
                "subscription_data[metadata][organization_id]",
                request.organization_id.to_string(),
            ),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| CheckoutGatewayError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(
                http_status = %status,
                "Stripe checkout session creation failed"
            );
            return Err(CheckoutGatewayError::Provider(format!(
                "Stripe API error ({}): {}",
                status, error_text
            )));
        }

        let session: StripeCheckoutSession = response.json().await.map_err(|e| {
            CheckoutGatewayError::Provider(format!("Failed to parse Stripe response: {}", e))
        })?;

        let url = session
            .url
            .unwrap_or_else(|| format!("https://checkout.stripe.com/c/pay/{}", session.id));

        Ok(HostedCheckout {
            id: session.id,
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_response_parses_with_url() {
        let json = r#"{"id": "cs_test_1", "url": "https://checkout.stripe.com/c/pay/cs_test_1"}"#;
        let session: StripeCheckoutSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.id, "cs_test_1");
        assert_eq!(
            session.url.as_deref(),
            Some("https://checkout.stripe.com/c/pay/cs_test_1")
        );
    }

    #[test]
    fn session_response_parses_without_url() {
        let json = r#"{"id": "cs_test_2", "object": "checkout.session"}"#;
        let session: StripeCheckoutSession = serde_json::from_str(json).unwrap();
        assert!(session.url.is_none());
    }
}
