//! Event ordering policy for ledger writes.
//!
//! The provider delivers events at-least-once and possibly out of order.
//! Each subscription write carries a composite ordering key of
//! `(current_period_end, event_created)`. An incoming write is discarded
//! only when it is strictly older than the stored key on **both** axes;
//! on a tie the incoming event wins, since the provider is the source of
//! truth and redelivery of the latest real state is the common case.
//!
//! The SQL upsert in the Postgres ledger adapter mirrors
//! [`OrderingKey::supersedes`] exactly; test ledgers reuse the function
//! directly.

use chrono::{DateTime, Utc};

/// Composite ordering key for a subscription write.
///
/// A missing period end orders before any present one, so an event without
/// the field can still apply unless its creation time is also older.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderingKey {
    /// Current billing period end reported by the event.
    pub period_end: Option<DateTime<Utc>>,

    /// When the provider created the event.
    pub event_created: DateTime<Utc>,
}

impl OrderingKey {
    pub fn new(period_end: Option<DateTime<Utc>>, event_created: DateTime<Utc>) -> Self {
        Self {
            period_end,
            event_created,
        }
    }

    /// Whether a write carrying this key may overwrite a row stored under
    /// `stored`.
    pub fn supersedes(&self, stored: &OrderingKey) -> bool {
        let older_period = self.period_end < stored.period_end;
        let older_created = self.event_created < stored.event_created;
        !(older_period && older_created)
    }
}
