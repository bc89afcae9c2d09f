//! PostgreSQL implementation of the SubscriptionLedger port.
//!
//! The upsert is a single conditional statement, so concurrent deliveries
//! for the same subscription id serialize on the row without a
//! read-modify-write window. The `WHERE` clause of the conflict update
//! mirrors `OrderingKey::supersedes`: the write is skipped when the stored
//! row is terminally canceled or strictly newer on both ordering axes.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::billing::SubscriptionStatus;
use crate::domain::foundation::OrganizationId;
use crate::ports::{LedgerError, SubscriptionLedger, SubscriptionUpsert, UpsertOutcome};

/// PostgreSQL implementation of the SubscriptionLedger port.
pub struct PostgresSubscriptionLedger {
    pool: PgPool,
}

impl PostgresSubscriptionLedger {
    /// Creates a ledger backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        LedgerError::Unavailable(err.to_string())
    }
}

#[async_trait]
impl SubscriptionLedger for PostgresSubscriptionLedger {
    async fn upsert(&self, change: SubscriptionUpsert) -> Result<UpsertOutcome, LedgerError> {
        let result = sqlx::query(
            r#"
            INSERT INTO subscriptions (
                subscription_id, organization_id, provider, status, price_id,
                customer_id, current_period_end, event_created, updated_at
            )
            VALUES ($1, $2, 'stripe', $3, $4, $5, $6, $7, now())
            ON CONFLICT (subscription_id) DO UPDATE SET
                status = EXCLUDED.status,
                price_id = EXCLUDED.price_id,
                customer_id = EXCLUDED.customer_id,
                current_period_end = EXCLUDED.current_period_end,
                event_created = EXCLUDED.event_created,
                updated_at = now()
            WHERE subscriptions.status <> 'canceled'
              AND NOT (
                    COALESCE(EXCLUDED.current_period_end, '-infinity'::timestamptz)
                        < COALESCE(subscriptions.current_period_end, '-infinity'::timestamptz)
                    AND EXCLUDED.event_created < subscriptions.event_created
              )
            "#,
        )
        .bind(&change.subscription_id)
        .bind(change.organization_id.as_uuid())
        .bind(change.status.as_str())
        .bind(&change.price_id)
        .bind(&change.customer_id)
        .bind(change.current_period_end)
        .bind(change.event_created)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            Ok(UpsertOutcome::Discarded)
        } else {
            Ok(UpsertOutcome::Applied)
        }
    }

    async fn mark_canceled(&self, subscription_id: &str) -> Result<(), LedgerError> {
        sqlx::query(
            r#"
            UPDATE subscriptions
            SET status = 'canceled', updated_at = now()
            WHERE subscription_id = $1
            "#,
        )
        .bind(subscription_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn current_status(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<SubscriptionStatus, LedgerError> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT status
            FROM subscriptions
            WHERE organization_id = $1
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .bind(organization_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row
            .map(|(status,)| SubscriptionStatus::from_provider(&status))
            .unwrap_or(SubscriptionStatus::None))
    }
}
