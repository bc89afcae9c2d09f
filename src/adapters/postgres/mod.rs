//! PostgreSQL adapters for the storage ports.

mod organization_directory;
mod subscription_ledger;

pub use organization_directory::PostgresOrganizationDirectory;
pub use subscription_ledger::PostgresSubscriptionLedger;
