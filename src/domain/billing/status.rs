//! Subscription status vocabulary.
//!
//! Mirrors the billing provider's status strings. The ledger stores and
//! returns these without interpreting them; the only decision made here is
//! whether a status entitles the organization to paid features.

use serde::{Deserialize, Serialize};

/// Status of an organization's subscription, as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Subscription is paid up and current.
    Active,

    /// Subscription is in a trial period.
    Trialing,

    /// Payment is past due, grace period active.
    PastDue,

    /// Subscription was canceled. Terminal for that subscription id.
    Canceled,

    /// Initial payment incomplete.
    Incomplete,

    /// Payment failed after retries exhausted.
    Unpaid,

    /// No subscription row exists for the organization.
    None,

    /// Status string this core does not recognize. The provider's
    /// vocabulary grows over time; unknown statuses are stored but never
    /// entitle.
    Unknown,
}

impl SubscriptionStatus {
    /// Parse a provider status string. Unrecognized values map to
    /// [`SubscriptionStatus::Unknown`] rather than failing.
    pub fn from_provider(s: &str) -> Self {
        match s {
            "active" => Self::Active,
            "trialing" => Self::Trialing,
            "past_due" => Self::PastDue,
            "canceled" => Self::Canceled,
            "incomplete" => Self::Incomplete,
            "unpaid" => Self::Unpaid,
            "none" => Self::None,
            _ => Self::Unknown,
        }
    }

    /// Stored representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Trialing => "trialing",
            Self::PastDue => "past_due",
            Self::Canceled => "canceled",
            Self::Incomplete => "incomplete",
            Self::Unpaid => "unpaid",
            Self::None => "none",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this status entitles the organization to paid features.
    ///
    /// Trials count as entitled; every other non-active status does not.
    pub fn grants_access(&self) -> bool {
        matches!(self, Self::Active | Self::Trialing)
    }

    /// Whether this status is terminal for its subscription id. Once
    /// terminal, only a brand-new subscription id can re-entitle the
    /// organization.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_strings_roundtrip() {
        for status in [
            SubscriptionStatus::Active,
            SubscriptionStatus::Trialing,
            SubscriptionStatus::PastDue,
            SubscriptionStatus::Canceled,
            SubscriptionStatus::Incomplete,
            SubscriptionStatus::Unpaid,
            SubscriptionStatus::None,
        ] {
            assert_eq!(SubscriptionStatus::from_provider(status.as_str()), status);
        }
    }

    #[test]
    fn unrecognized_status_maps_to_unknown() {
        assert_eq!(
            SubscriptionStatus::from_provider("paused"),
            SubscriptionStatus::Unknown
        );
    }

    #[test]
    fn only_active_and_trialing_grant_access() {
        assert!(SubscriptionStatus::Active.grants_access());
        assert!(SubscriptionStatus::Trialing.grants_access());

        assert!(!SubscriptionStatus::PastDue.grants_access());
        assert!(!SubscriptionStatus::Canceled.grants_access());
        assert!(!SubscriptionStatus::Incomplete.grants_access());
        assert!(!SubscriptionStatus::Unpaid.grants_access());
        assert!(!SubscriptionStatus::None.grants_access());
        assert!(!SubscriptionStatus::Unknown.grants_access());
    }

    #[test]
    fn only_canceled_is_terminal() {
        assert!(SubscriptionStatus::Canceled.is_terminal());
        assert!(!SubscriptionStatus::Active.is_terminal());
        assert!(!SubscriptionStatus::Unpaid.is_terminal());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&SubscriptionStatus::PastDue).unwrap();
        assert_eq!(json, "\"past_due\"");
        let status: SubscriptionStatus = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(status, SubscriptionStatus::None);
    }
}
