//! PostgreSQL implementation of the OrganizationDirectory port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, OrganizationId, UserId};
use crate::domain::organization::{OrgMembership, OrgRole};
use crate::ports::OrganizationDirectory;

/// PostgreSQL implementation of the OrganizationDirectory port.
pub struct PostgresOrganizationDirectory {
    pool: PgPool,
}

impl PostgresOrganizationDirectory {
    /// Creates a directory backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row for a membership joined with its organization.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    user_id: Uuid,
    organization_id: Uuid,
    role: String,
    organization_name: String,
    organization_slug: String,
    organization_created_at: DateTime<Utc>,
}

impl TryFrom<MembershipRow> for OrgMembership {
    type Error = DomainError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        let role = OrgRole::parse(&row.role).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid role value: {}", row.role),
            )
        })?;

        Ok(OrgMembership {
            user_id: UserId::from_uuid(row.user_id),
            organization_id: OrganizationId::from_uuid(row.organization_id),
            role,
            organization_name: row.organization_name,
            organization_slug: row.organization_slug,
            organization_created_at: row.organization_created_at,
        })
    }
}

#[async_trait]
impl OrganizationDirectory for PostgresOrganizationDirectory {
    async fn memberships_for(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<OrgMembership>, DomainError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(
            r#"
            SELECT m.user_id,
                   m.organization_id,
                   m.role,
                   o.name AS organization_name,
                   o.slug AS organization_slug,
                   o.created_at AS organization_created_at
            FROM memberships m
            JOIN organizations o ON o.id = m.organization_id
            WHERE m.user_id = $1
            ORDER BY o.created_at ASC, o.id ASC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(e.to_string()))?;

        rows.into_iter().map(OrgMembership::try_from).collect()
    }
}
