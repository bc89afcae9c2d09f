//! Session middleware and extractors.
//!
//! The middleware reads the session cookie, verifies it through the
//! `SessionVerifier` port, and injects the resulting [`VerifiedSession`]
//! into request extensions. Handlers that require an identity use the
//! [`RequireSession`] extractor, which rejects with `401` when no verified
//! session is present.
//!
//! A present-but-invalid token and an absent token produce the same
//! response body; callers cannot distinguish the failure modes.
//!
//! ```text
//! Request → session_middleware → injects VerifiedSession into extensions
//!                                         ↓
//!                               Handler → RequireSession reads extensions
//! ```

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use std::sync::Arc;

use crate::domain::foundation::VerifiedSession;
use crate::ports::SessionVerifier;

use super::cookies::session_token;

/// Session middleware state: the verifier plus cookie names.
#[derive(Clone)]
pub struct SessionLayer {
    pub verifier: Arc<dyn SessionVerifier>,
    pub session_cookie: String,
    pub secure_session_cookie: String,
}

/// Verify the session cookie when present and expose the identity to
/// handlers.
///
/// - Valid token: [`VerifiedSession`] injected into extensions.
/// - Invalid token: `401`, identical body to the missing-token rejection.
/// - Missing token: continues without identity; `RequireSession` enforces.
pub async fn session_middleware(
    State(layer): State<SessionLayer>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = session_token(
        request.headers(),
        &layer.session_cookie,
        &layer.secure_session_cookie,
    )
    .map(str::to_string);

    match token {
        Some(token) => match layer.verifier.verify(&token).await {
            Ok(session) => {
                request.extensions_mut().insert(session);
                next.run(request).await
            }
            Err(_) => SessionRejection::Unauthenticated.into_response(),
        },
        None => next.run(request).await,
    }
}

/// Extractor that requires a verified session.
#[derive(Debug, Clone)]
pub struct RequireSession(pub VerifiedSession);

impl<S> axum::extract::FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<VerifiedSession>()
                .cloned()
                .map(RequireSession)
                .ok_or(SessionRejection::Unauthenticated)
        })
    }
}

/// Rejection for requests without a usable session.
#[derive(Debug, Clone)]
pub enum SessionRejection {
    Unauthenticated,
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "unauthorized" })),
        )
            .into_response()
    }
}
