//! Axum router configuration for billing endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{billing_status, handle_webhook, start_checkout};

/// Session-gated billing routes.
///
/// - `POST /checkout` - start a hosted checkout flow
/// - `GET  /status` - current subscription status
pub fn billing_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(start_checkout))
        .route("/status", get(billing_status))
}

/// Webhook route, kept separate because it carries its own authentication
/// (a signature over the raw body, not a session) and must not sit behind
/// the access gate or session layer.
///
/// - `POST /webhook` - provider event delivery
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/webhook", post(handle_webhook))
}
