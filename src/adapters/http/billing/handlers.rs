//! Axum handlers for billing endpoints.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireSession;
use crate::adapters::http::AppState;
use crate::application::billing::StartCheckoutError;
use crate::domain::billing::WebhookError;
use crate::domain::organization::default_organization;

use super::dto::{BillingStatusResponse, CheckoutResponse, ErrorResponse, WebhookAck};

/// Header carrying the provider's webhook signature.
const SIGNATURE_HEADER: &str = "stripe-signature";

fn error_response(status: StatusCode, error: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

/// `POST /api/billing/checkout` - start a hosted checkout for the caller's
/// organization.
pub async fn start_checkout(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
) -> Response {
    match state.start_checkout.handle(&session.user_id).await {
        Ok(checkout) => Json(CheckoutResponse { url: checkout.url }).into_response(),
        Err(StartCheckoutError::NoOrganization) => {
            error_response(StatusCode::BAD_REQUEST, "no_org")
        }
        Err(StartCheckoutError::NotConfigured) => {
            tracing::error!(
                user_id = %session.user_id,
                "Checkout attempted but no plan price is configured"
            );
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "billing_not_configured")
        }
        Err(err) => {
            tracing::error!(user_id = %session.user_id, error = %err, "Checkout failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    }
}

/// `GET /api/billing/status` - current ledger status for the caller's
/// organization. Defaults to `none` when no subscription row exists.
pub async fn billing_status(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
) -> Response {
    let memberships = match state.directory.memberships_for(&session.user_id).await {
        Ok(memberships) => memberships,
        Err(err) => {
            tracing::error!(user_id = %session.user_id, error = %err, "Membership lookup failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal_error");
        }
    };

    let Some(membership) = default_organization(&memberships) else {
        return error_response(StatusCode::BAD_REQUEST, "no_org");
    };

    match state.ledger.current_status(&membership.organization_id).await {
        Ok(status) => Json(BillingStatusResponse { status }).into_response(),
        Err(err) => {
            tracing::error!(
                organization_id = %membership.organization_id,
                error = %err,
                "Ledger status read failed"
            );
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    }
}

/// `POST /api/billing/webhook` - billing provider event delivery.
///
/// Authenticated by signature over the raw body, never by session; this
/// endpoint is mounted outside the access gate. Responds `200` only after
/// the ledger mutation commits, so every earlier failure leaves the
/// provider's retry mechanism in charge.
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    match state.ingest_event.ingest(&body, signature).await {
        Ok(_) => Json(WebhookAck { received: true }).into_response(),
        Err(err) => {
            match &err {
                WebhookError::MissingSignature
                | WebhookError::InvalidSignature
                | WebhookError::TimestampOutOfRange => {
                    tracing::warn!(error = %err, "Webhook authentication failed - possible forgery");
                }
                WebhookError::Ledger(_) => {
                    tracing::error!(error = %err, "Webhook ledger write failed; provider will retry");
                }
                _ => {
                    tracing::warn!(error = %err, "Webhook rejected");
                }
            }
            (
                err.status_code(),
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}
