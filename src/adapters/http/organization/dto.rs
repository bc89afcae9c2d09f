//! Request/response DTOs for organization endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::OrganizationId;
use crate::domain::organization::OrgMembership;

/// One organization the caller belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgSummary {
    pub id: OrganizationId,
    pub name: String,
    pub slug: String,
}

impl From<&OrgMembership> for OrgSummary {
    fn from(membership: &OrgMembership) -> Self {
        Self {
            id: membership.organization_id,
            name: membership.organization_name.clone(),
            slug: membership.organization_slug.clone(),
        }
    }
}

/// Response listing the caller's organizations, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgsResponse {
    pub orgs: Vec<OrgSummary>,
}
