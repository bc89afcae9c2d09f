//! Billing provider webhook event types.
//!
//! Structures for parsing provider webhook payloads. Only fields relevant
//! to subscription tracking are captured; the rest of the provider's event
//! schema is ignored.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::OrganizationId;

use super::SubscriptionStatus;

/// Metadata key carrying the checkout correlation back to an organization.
pub const ORGANIZATION_METADATA_KEY: &str = "organization_id";

/// Provider webhook event envelope (simplified).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BillingEvent {
    /// Unique identifier for the event (evt_xxx format).
    pub id: String,

    /// Type of event (e.g., "customer.subscription.updated").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Time at which the event was created (Unix timestamp).
    pub created: i64,

    /// Object containing event-specific data.
    pub data: BillingEventData,

    /// Whether this is a live mode event (vs test mode).
    #[serde(default)]
    pub livemode: bool,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BillingEventData {
    /// The object that triggered the event (polymorphic based on event type).
    pub object: serde_json::Value,
}

impl BillingEvent {
    /// Parse the event type into a known enum variant.
    pub fn parsed_type(&self) -> BillingEventType {
        BillingEventType::from_str(&self.event_type)
    }

    /// Event creation time as a timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.created, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    /// Attempts to deserialize the data object as the specified type.
    pub fn deserialize_object<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.object.clone())
    }
}

/// Known provider event types that this core handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingEventType {
    /// A subscription was created.
    SubscriptionCreated,
    /// A subscription was updated.
    SubscriptionUpdated,
    /// A subscription was deleted (canceled at the provider).
    SubscriptionDeleted,
    /// Unknown or unhandled event type. Acknowledged and dropped; the
    /// provider's vocabulary grows over time and unrecognized events must
    /// not cause retries.
    Unknown,
}

impl BillingEventType {
    /// Parse event type from the provider's type string.
    pub fn from_str(s: &str) -> Self {
        match s {
            "customer.subscription.created" => Self::SubscriptionCreated,
            "customer.subscription.updated" => Self::SubscriptionUpdated,
            "customer.subscription.deleted" => Self::SubscriptionDeleted,
            _ => Self::Unknown,
        }
    }

    /// Convert to the provider's event type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubscriptionCreated => "customer.subscription.created",
            Self::SubscriptionUpdated => "customer.subscription.updated",
            Self::SubscriptionDeleted => "customer.subscription.deleted",
            Self::Unknown => "unknown",
        }
    }
}

/// Subscription object as embedded in subscription lifecycle events.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubscriptionObject {
    /// Provider-assigned subscription id (sub_xxx format).
    pub id: String,

    /// Provider customer id.
    #[serde(default)]
    pub customer: Option<String>,

    /// Provider status string.
    pub status: String,

    /// Current billing period end (Unix timestamp).
    #[serde(default)]
    pub current_period_end: Option<i64>,

    /// Subscription line items; the first item's price identifies the plan.
    #[serde(default)]
    pub items: SubscriptionItems,

    /// Opaque metadata attached at checkout.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Line items of a subscription.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubscriptionItems {
    #[serde(default)]
    pub data: Vec<SubscriptionItem>,
}

/// A single subscription line item.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubscriptionItem {
    #[serde(default)]
    pub price: Option<PriceRef>,
}

/// Reference to a provider price.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PriceRef {
    pub id: String,
}

impl SubscriptionObject {
    /// Parsed provider status.
    pub fn parsed_status(&self) -> SubscriptionStatus {
        SubscriptionStatus::from_provider(&self.status)
    }

    /// Plan price id from the first line item, when present.
    pub fn price_id(&self) -> Option<&str> {
        self.items
            .data
            .first()
            .and_then(|item| item.price.as_ref())
            .map(|price| price.id.as_str())
    }

    /// Organization the subscription belongs to, from checkout metadata.
    ///
    /// `None` means the event is unattributable and must be acknowledged
    /// without a ledger mutation.
    pub fn organization_id(&self) -> Option<OrganizationId> {
        self.metadata
            .get(ORGANIZATION_METADATA_KEY)
            .and_then(|raw| raw.parse().ok())
    }

    /// Current period end as a timestamp, when present.
    pub fn period_end(&self) -> Option<DateTime<Utc>> {
        self.current_period_end
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
    }
}
