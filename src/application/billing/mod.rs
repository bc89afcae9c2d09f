//! Billing command handlers.

mod ingest_event;
mod start_checkout;

pub use ingest_event::{IngestEventHandler, IngestOutcome};
pub use start_checkout::{CheckoutPlan, StartCheckoutError, StartCheckoutHandler};
