//! Subscription ledger port.
//!
//! The ledger is the durable, per-organization record of billing state and
//! the single source of truth for feature gating. It is mutated only by
//! the webhook ingestor; everything else reads.
//!
//! ## Concurrency
//!
//! The provider may fan out retries or near-simultaneous created/updated
//! events for the same subscription id. `upsert` must therefore be a
//! single atomic conditional write (storage-level upsert keyed by the
//! unique subscription id, guarded by the ordering key), never a
//! read-modify-write pair split across round trips.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::billing::{OrderingKey, SubscriptionStatus, WebhookError};
use crate::domain::foundation::OrganizationId;

/// One subscription state change derived from a provider event.
///
/// `(provider, subscription_id)` is globally unique and is the idempotency
/// key for all ledger mutations: re-applying identical state changes
/// nothing observable.
#[derive(Debug, Clone)]
pub struct SubscriptionUpsert {
    /// Provider-assigned subscription id.
    pub subscription_id: String,

    /// Organization the subscription belongs to.
    pub organization_id: OrganizationId,

    /// Provider-reported status.
    pub status: SubscriptionStatus,

    /// Plan price identifier, when the event carries one.
    pub price_id: Option<String>,

    /// Provider customer id, when the event carries one.
    pub customer_id: Option<String>,

    /// Current billing period end.
    pub current_period_end: Option<DateTime<Utc>>,

    /// When the provider created the event this change derives from.
    pub event_created: DateTime<Utc>,
}

impl SubscriptionUpsert {
    /// Ordering key guarding the write against stale redeliveries.
    pub fn ordering_key(&self) -> OrderingKey {
        OrderingKey::new(self.current_period_end, self.event_created)
    }
}

/// Result of an upsert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The write was applied (row inserted or updated).
    Applied,
    /// The write was discarded: stale ordering key, or the stored row is
    /// terminally canceled.
    Discarded,
}

/// Errors from ledger storage.
///
/// All ledger failures are transient from the webhook path's perspective:
/// they surface as a non-2xx so the provider's redelivery retries them.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

impl From<LedgerError> for WebhookError {
    fn from(err: LedgerError) -> Self {
        WebhookError::Ledger(err.to_string())
    }
}

/// Durable record of per-organization subscription state.
#[async_trait]
pub trait SubscriptionLedger: Send + Sync {
    /// Apply a subscription state change.
    ///
    /// Idempotent and ordering-aware: applying the same
    /// `(subscription_id, status, period_end)` twice is an observable
    /// no-op, and a change that is stale under [`OrderingKey::supersedes`]
    /// or targets a canceled row is discarded rather than regressing
    /// state.
    async fn upsert(&self, change: SubscriptionUpsert) -> Result<UpsertOutcome, LedgerError>;

    /// Set the subscription's status to canceled, regardless of current
    /// status. Cancellation always wins and is terminal for the id.
    async fn mark_canceled(&self, subscription_id: &str) -> Result<(), LedgerError>;

    /// Current status for the organization.
    ///
    /// Returns [`SubscriptionStatus::None`] if no row exists. If multiple
    /// historical rows exist, returns the most-recently-updated row's
    /// status (at most one should be non-terminal at a time by
    /// construction, but the query is defensive).
    async fn current_status(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<SubscriptionStatus, LedgerError>;
}
