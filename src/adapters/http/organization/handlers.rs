//! Axum handlers for organization endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireSession;
use crate::adapters::http::AppState;

use super::dto::{OrgSummary, OrgsResponse};

/// `GET /api/orgs` - list the caller's organizations, oldest first.
///
/// An empty list is a normal response, not an error; it means the user has
/// no billing context yet.
pub async fn list_organizations(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
) -> Response {
    match state.directory.memberships_for(&session.user_id).await {
        Ok(memberships) => {
            let orgs = memberships.iter().map(OrgSummary::from).collect();
            Json(OrgsResponse { orgs }).into_response()
        }
        Err(err) => {
            tracing::error!(user_id = %session.user_id, error = %err, "Membership lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "internal_error" })),
            )
                .into_response()
        }
    }
}
