//! Session identity types.
//!
//! A [`VerifiedSession`] is the outcome of validating a session token. It
//! is a domain type with no token-library dependencies; the `SessionVerifier`
//! port populates it.
//!
//! Verification failure is a single value, [`InvalidSession`]. Callers must
//! not learn whether a token was missing, malformed, expired, or carried a
//! bad signature; the verifier logs that detail internally and collapses
//! everything to this one rejection.

use thiserror::Error;

use super::UserId;

/// Identity claims extracted from a verified session token.
#[derive(Debug, Clone)]
pub struct VerifiedSession {
    /// The authenticated user.
    pub user_id: UserId,

    /// Email claim, when the token carries one.
    pub email: Option<String>,
}

impl VerifiedSession {
    /// Creates a verified session.
    pub fn new(user_id: UserId, email: Option<String>) -> Self {
        Self { user_id, email }
    }
}

/// The single externally-visible session verification failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid session")]
pub struct InvalidSession;
