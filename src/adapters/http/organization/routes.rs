//! Axum router configuration for organization endpoints.

use axum::{routing::get, Router};

use crate::adapters::http::AppState;

use super::handlers::list_organizations;

/// Session-gated organization routes.
///
/// - `GET /orgs` - list the caller's organizations
pub fn organization_routes() -> Router<AppState> {
    Router::new().route("/orgs", get(list_organizations))
}
