//! Organization and membership types.
//!
//! An organization is the tenant: the unit of billing and access control.
//! Users belong to organizations through memberships carrying a role.
//! Every organization has at least one owner at all times; that invariant
//! is enforced by the org-management surface, and assumed here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OrganizationId, UserId};

/// A tenant organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    /// URL-safe unique handle.
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

/// Role a user holds within an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrgRole {
    Owner,
    Member,
}

impl OrgRole {
    /// Parse a role from its stored representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OWNER" => Some(Self::Owner),
            "MEMBER" => Some(Self::Member),
            _ => None,
        }
    }

    /// Stored representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Member => "MEMBER",
        }
    }
}

/// A user's membership in one organization, as seen by the resolver.
///
/// Carries the organization's creation time so the default-organization
/// policy can be applied without another lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgMembership {
    pub user_id: UserId,
    pub organization_id: OrganizationId,
    pub role: OrgRole,
    pub organization_name: String,
    pub organization_slug: String,
    pub organization_created_at: DateTime<Utc>,
}

/// Picks the organization single-organization flows act on when a user
/// belongs to more than one and none was selected explicitly.
///
/// Policy: the first organization by creation order. This is a documented,
/// deterministic tie-break, independent of storage query order; callers
/// may pass memberships in any order.
///
/// Returns `None` for a user with no memberships, which callers must treat
/// as "no billing context" rather than an error.
pub fn default_organization(memberships: &[OrgMembership]) -> Option<&OrgMembership> {
    memberships.iter().min_by(|a, b| {
        a.organization_created_at
            .cmp(&b.organization_created_at)
            .then_with(|| a.organization_id.to_string().cmp(&b.organization_id.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn membership(created_offset_days: i64) -> OrgMembership {
        OrgMembership {
            user_id: UserId::new(),
            organization_id: OrganizationId::new(),
            role: OrgRole::Owner,
            organization_name: "Org".to_string(),
            organization_slug: "org".to_string(),
            organization_created_at: Utc
                .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
                .unwrap()
                + chrono::Duration::days(created_offset_days),
        }
    }

    #[test]
    fn role_parse_roundtrip() {
        assert_eq!(OrgRole::parse("OWNER"), Some(OrgRole::Owner));
        assert_eq!(OrgRole::parse("MEMBER"), Some(OrgRole::Member));
        assert_eq!(OrgRole::parse("ADMIN"), None);
        assert_eq!(OrgRole::parse(OrgRole::Owner.as_str()), Some(OrgRole::Owner));
    }

    #[test]
    fn default_organization_of_empty_is_none() {
        assert!(default_organization(&[]).is_none());
    }

    #[test]
    fn default_organization_picks_oldest() {
        let older = membership(0);
        let newer = membership(5);
        let picked = default_organization(&[newer.clone(), older.clone()]).unwrap();
        assert_eq!(picked.organization_id, older.organization_id);
    }

    #[test]
    fn default_organization_is_order_independent() {
        let a = membership(1);
        let b = membership(2);
        let c = membership(3);

        let forward = default_organization(&[a.clone(), b.clone(), c.clone()])
            .unwrap()
            .organization_id;
        let reverse = default_organization(&[c, b, a]).unwrap().organization_id;
        assert_eq!(forward, reverse);
    }

    #[test]
    fn creation_time_tie_breaks_on_id() {
        let mut a = membership(0);
        let mut b = membership(0);
        // Force a deterministic id ordering for the tie.
        a.organization_id = "00000000-0000-4000-8000-000000000001".parse().unwrap();
        b.organization_id = "00000000-0000-4000-8000-000000000002".parse().unwrap();

        let picked = default_organization(&[b.clone(), a.clone()]).unwrap();
        assert_eq!(picked.organization_id, a.organization_id);
    }
}
