//! StartCheckoutHandler - Command handler for starting a paid-plan checkout.
//!
//! Resolves the caller's organization, verifies operator configuration,
//! and creates a provider-hosted checkout session tagged with the
//! organization id. Writes no local state: the ledger is only ever mutated
//! by the webhook ingestor.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::UserId;
use crate::domain::organization::default_organization;
use crate::ports::{
    CheckoutGateway, CheckoutGatewayError, CreateCheckoutRequest, HostedCheckout,
    OrganizationDirectory,
};

/// Checkout plan parameters drawn from operator configuration.
///
/// `price_id` is `None` when the operator has not configured a plan; a
/// checkout attempt then fails with [`StartCheckoutError::NotConfigured`],
/// which is an operator problem and distinct from the user-facing
/// [`StartCheckoutError::NoOrganization`].
#[derive(Debug, Clone)]
pub struct CheckoutPlan {
    pub price_id: Option<String>,
    pub success_url: String,
    pub cancel_url: String,
}

/// Errors from checkout initiation.
#[derive(Debug, Error)]
pub enum StartCheckoutError {
    /// The authenticated user belongs to no organization. A
    /// data-completeness issue for that user, not a misconfiguration.
    #[error("User has no organization")]
    NoOrganization,

    /// The plan price or provider credentials are absent from
    /// configuration. Operator-actionable; surfaced via logs rather than
    /// end users.
    #[error("Billing is not configured")]
    NotConfigured,

    /// Membership lookup failed.
    #[error("Directory error: {0}")]
    Directory(String),

    /// The billing provider call failed.
    #[error("Provider error: {0}")]
    Provider(String),
}

impl From<CheckoutGatewayError> for StartCheckoutError {
    fn from(err: CheckoutGatewayError) -> Self {
        StartCheckoutError::Provider(err.to_string())
    }
}

/// Handler for starting a hosted checkout flow.
pub struct StartCheckoutHandler {
    directory: Arc<dyn OrganizationDirectory>,
    gateway: Arc<dyn CheckoutGateway>,
    plan: CheckoutPlan,
}

impl StartCheckoutHandler {
    pub fn new(
        directory: Arc<dyn OrganizationDirectory>,
        gateway: Arc<dyn CheckoutGateway>,
        plan: CheckoutPlan,
    ) -> Self {
        Self {
            directory,
            gateway,
            plan,
        }
    }

    /// Start a checkout for the given user's default organization.
    pub async fn handle(&self, user_id: &UserId) -> Result<HostedCheckout, StartCheckoutError> {
        // 1. Resolve the user's organization.
        let memberships = self
            .directory
            .memberships_for(user_id)
            .await
            .map_err(|e| StartCheckoutError::Directory(e.to_string()))?;

        let organization = default_organization(&memberships)
            .ok_or(StartCheckoutError::NoOrganization)?;

        // 2. Verify operator configuration before reaching the provider.
        let price_id = self
            .plan
            .price_id
            .clone()
            .ok_or(StartCheckoutError::NotConfigured)?;

        // 3. Create the provider session; the organization id rides along
        //    as metadata so the eventual webhook can be attributed.
        let session = self
            .gateway
            .create_checkout_session(CreateCheckoutRequest {
                organization_id: organization.organization_id,
                price_id,
                success_url: self.plan.success_url.clone(),
                cancel_url: self.plan.cancel_url.clone(),
            })
            .await?;

        tracing::info!(
            user_id = %user_id,
            organization_id = %organization.organization_id,
            checkout_session = %session.id,
            "Started checkout"
        );

        Ok(session)
    }
}
