//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionVerifier` - session token validation
//! - `OrganizationDirectory` - user-to-organization resolution
//! - `SubscriptionLedger` - durable billing state, single source of truth
//! - `CheckoutGateway` - hosted checkout creation at the billing provider

mod checkout_gateway;
mod organization_directory;
mod session_verifier;
mod subscription_ledger;

pub use checkout_gateway::{
    CheckoutGateway, CheckoutGatewayError, CreateCheckoutRequest, HostedCheckout,
};
pub use organization_directory::OrganizationDirectory;
pub use session_verifier::SessionVerifier;
pub use subscription_ledger::{
    LedgerError, SubscriptionLedger, SubscriptionUpsert, UpsertOutcome,
};
