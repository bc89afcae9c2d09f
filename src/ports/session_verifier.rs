//! Session verification port.
//!
//! Defines the contract for validating a raw session token and resolving
//! it to a user identity. Implementations are side-effect-free functions
//! of the token and the configured signing secret; no server-side session
//! store is consulted.
//!
//! # Contract
//!
//! Implementations must:
//! - Validate the token signature against the configured secret
//! - Validate the token is well-formed and not expired
//! - Collapse every failure mode to [`InvalidSession`] — callers must not
//!   be able to distinguish "missing" from "expired" from "malformed"
//!   (internal logs may retain the detail)

use async_trait::async_trait;

use crate::domain::foundation::{InvalidSession, VerifiedSession};

/// Validates session tokens and extracts the user identity.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Validate a raw session token.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedSession)` - token is valid, identity extracted from claims
    /// * `Err(InvalidSession)` - any failure: bad signature, expired, malformed
    async fn verify(&self, token: &str) -> Result<VerifiedSession, InvalidSession>;
}
