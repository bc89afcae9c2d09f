//! HTTP adapter: routers, handlers, and middleware.
//!
//! Router composition follows the control flow of the core: the access
//! gate wraps everything a browser can reach, the session layer wraps the
//! API surface, and the webhook route sits outside both because it carries
//! its own authentication.

pub mod billing;
pub mod middleware;
pub mod organization;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::application::billing::{IngestEventHandler, StartCheckoutHandler};
use crate::ports::{OrganizationDirectory, SubscriptionLedger};

use middleware::{access_gate, session_middleware, AccessGateConfig, SessionLayer};

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub start_checkout: Arc<StartCheckoutHandler>,
    pub ingest_event: Arc<IngestEventHandler>,
    pub ledger: Arc<dyn SubscriptionLedger>,
    pub directory: Arc<dyn OrganizationDirectory>,
}

/// Build the application router.
///
/// ```text
/// /api/billing/webhook      signature-authenticated, outside the gate
/// /api/billing/checkout     gate (pass-through) → session layer → handler
/// /api/billing/status       gate (pass-through) → session layer → handler
/// /api/orgs                 gate (pass-through) → session layer → handler
/// /healthz                  public
/// everything else           access gate → page surface (out of scope)
/// ```
pub fn app_router(
    state: AppState,
    session: SessionLayer,
    gate: Arc<AccessGateConfig>,
) -> Router {
    let session_gated = Router::new()
        .nest("/api/billing", billing::routes::billing_routes())
        .nest("/api", organization::routes::organization_routes())
        .layer(from_fn_with_state(session, session_middleware));

    let gated = session_gated
        .route("/healthz", get(health))
        .fallback(page_placeholder)
        .layer(from_fn_with_state(gate, access_gate));

    Router::new()
        .nest("/api/billing", billing::routes::webhook_routes())
        .merge(gated)
        .with_state(state)
}

/// Liveness probe.
async fn health() -> &'static str {
    "ok"
}

/// Stand-in for the page-serving surface, which is outside this core.
async fn page_placeholder() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "not_found" })),
    )
        .into_response()
}
