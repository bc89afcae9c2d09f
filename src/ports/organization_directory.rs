//! Organization resolution port.
//!
//! Maps an authenticated user to the organizations they belong to and the
//! role held in each. Backed by membership records in durable storage.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::organization::OrgMembership;

/// Read access to organization memberships.
#[async_trait]
pub trait OrganizationDirectory: Send + Sync {
    /// All memberships of the given user, ordered by organization creation
    /// time (oldest first).
    ///
    /// Returns an empty list (not an error) for a user with no
    /// memberships; callers must treat that as "no billing context".
    async fn memberships_for(&self, user_id: &UserId)
        -> Result<Vec<OrgMembership>, DomainError>;
}
