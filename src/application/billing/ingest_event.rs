//! IngestEventHandler - Command handler for billing provider webhooks.
//!
//! Implements the webhook state machine: authenticate, decode, attribute,
//! apply, acknowledge. Success is only reported after the ledger mutation
//! durably commits; any earlier failure surfaces as an error so the
//! provider retries. Unknown and unattributable events are acknowledged
//! and dropped — they must never make the provider retry indefinitely.

use std::sync::Arc;

use crate::domain::billing::{
    BillingEvent, BillingEventType, SubscriptionObject, WebhookError, WebhookVerifier,
};
use crate::ports::{SubscriptionLedger, SubscriptionUpsert, UpsertOutcome};

/// Outcome of ingesting one webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Ledger state was updated.
    Applied,

    /// The event was authentic but stale (or targeted a canceled
    /// subscription); the ledger discarded it.
    Discarded,

    /// The subscription was marked canceled.
    Canceled,

    /// Event type outside this core's vocabulary; acknowledged and dropped.
    Ignored,

    /// No organization id in the event metadata; acknowledged and logged.
    Unattributable,
}

/// Handler for billing provider webhook deliveries.
pub struct IngestEventHandler {
    verifier: WebhookVerifier,
    ledger: Arc<dyn SubscriptionLedger>,
}

impl IngestEventHandler {
    pub fn new(verifier: WebhookVerifier, ledger: Arc<dyn SubscriptionLedger>) -> Self {
        Self { verifier, ledger }
    }

    /// Ingest a raw webhook delivery.
    ///
    /// `signature` is the raw signature header, absent when the provider
    /// (or an imposter) sent none.
    pub async fn ingest(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<IngestOutcome, WebhookError> {
        // 1. Authenticate. Failures here are permanent and security-relevant.
        let signature = signature.ok_or(WebhookError::MissingSignature)?;
        let event = self.verifier.verify_and_parse(payload, signature)?;

        // 2-4. Decode, attribute, apply.
        self.apply(event).await
    }

    async fn apply(&self, event: BillingEvent) -> Result<IngestOutcome, WebhookError> {
        match event.parsed_type() {
            BillingEventType::SubscriptionCreated | BillingEventType::SubscriptionUpdated => {
                self.apply_subscription_change(&event).await
            }
            BillingEventType::SubscriptionDeleted => self.apply_cancellation(&event).await,
            BillingEventType::Unknown => {
                tracing::debug!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    "Ignoring out-of-vocabulary billing event"
                );
                Ok(IngestOutcome::Ignored)
            }
        }
    }

    async fn apply_subscription_change(
        &self,
        event: &BillingEvent,
    ) -> Result<IngestOutcome, WebhookError> {
        let subscription: SubscriptionObject = event
            .deserialize_object()
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        let Some(organization_id) = subscription.organization_id() else {
            tracing::warn!(
                event_id = %event.id,
                subscription_id = %subscription.id,
                "Billing event has no organization metadata; acknowledging without mutation"
            );
            return Ok(IngestOutcome::Unattributable);
        };

        let change = SubscriptionUpsert {
            subscription_id: subscription.id.clone(),
            organization_id,
            status: subscription.parsed_status(),
            price_id: subscription.price_id().map(str::to_string),
            customer_id: subscription.customer.clone(),
            current_period_end: subscription.period_end(),
            event_created: event.created_at(),
        };

        match self.ledger.upsert(change).await? {
            UpsertOutcome::Applied => {
                tracing::info!(
                    event_id = %event.id,
                    subscription_id = %subscription.id,
                    organization_id = %organization_id,
                    status = %subscription.status,
                    "Applied subscription change"
                );
                Ok(IngestOutcome::Applied)
            }
            UpsertOutcome::Discarded => {
                tracing::info!(
                    event_id = %event.id,
                    subscription_id = %subscription.id,
                    "Discarded stale or terminal subscription change"
                );
                Ok(IngestOutcome::Discarded)
            }
        }
    }

    async fn apply_cancellation(
        &self,
        event: &BillingEvent,
    ) -> Result<IngestOutcome, WebhookError> {
        let subscription: SubscriptionObject = event
            .deserialize_object()
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        self.ledger.mark_canceled(&subscription.id).await?;

        tracing::info!(
            event_id = %event.id,
            subscription_id = %subscription.id,
            "Marked subscription canceled"
        );
        Ok(IngestOutcome::Canceled)
    }
}
