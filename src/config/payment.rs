//! Payment configuration
//!
//! Billing-provider (Stripe) credentials and checkout parameters. The
//! price id is optional at load time: checkout requests fail with a
//! distinct operator-facing error when it is unset, rather than failing
//! startup for deployments that never sell a plan.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe API key
    pub stripe_api_key: SecretString,

    /// Stripe webhook signing secret
    pub stripe_webhook_secret: SecretString,

    /// Stripe price ID for the paid plan
    pub stripe_price_id: Option<String>,

    /// Base URL the browser returns to after checkout
    #[serde(default = "default_app_base_url")]
    pub app_base_url: String,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.expose_secret().starts_with("sk_test_")
    }

    /// URL the provider redirects to on successful checkout.
    pub fn checkout_success_url(&self) -> String {
        format!("{}/dashboard?status=success", self.app_base_url.trim_end_matches('/'))
    }

    /// URL the provider redirects to on canceled checkout.
    pub fn checkout_cancel_url(&self) -> String {
        format!("{}/dashboard?status=cancel", self.app_base_url.trim_end_matches('/'))
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_API_KEY"));
        }
        if self.stripe_webhook_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
        }

        // Verify key prefixes for safety
        if !self.stripe_api_key.expose_secret().starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_webhook_secret.expose_secret().starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_api_key: SecretString::new(String::new()),
            stripe_webhook_secret: SecretString::new(String::new()),
            stripe_price_id: None,
            app_base_url: default_app_base_url(),
        }
    }
}

fn default_app_base_url() -> String {
    "http://localhost:3000".to_string()
}
