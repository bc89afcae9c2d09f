//! HS256 session token adapter.
//!
//! Implements the `SessionVerifier` port for the application's own signed
//! session tokens. Tokens are stateless JWTs signed with a shared secret:
//! no session store is consulted on the request path.
//!
//! Every rejection — malformed token, bad signature, expired, unusable
//! subject — collapses to the single [`InvalidSession`] value. The
//! specific cause is logged at `debug` here and never reaches a caller.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{InvalidSession, UserId, VerifiedSession};
use crate::ports::SessionVerifier;

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// Subject - the user id.
    sub: String,

    /// Expiry timestamp (Unix epoch seconds).
    exp: i64,

    /// Issued-at timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iat: Option<i64>,

    /// User's email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

/// Session verifier backed by HS256 over the configured secret.
pub struct JwtSessionVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionVerifier {
    /// Creates a verifier for tokens signed with `secret`.
    pub fn new(secret: &SecretString) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl SessionVerifier for JwtSessionVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedSession, InvalidSession> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Session token rejected");
                InvalidSession
            })?;

        let user_id: UserId = data.claims.sub.parse().map_err(|e| {
            tracing::debug!(error = %e, "Session token subject is not a user id");
            InvalidSession
        })?;

        Ok(VerifiedSession::new(user_id, data.claims.email))
    }
}

/// Issue a signed session token.
///
/// Used by the login surface (outside this core) and by tests; verification
/// is the contract this crate owns.
pub fn issue_session_token(
    secret: &SecretString,
    user_id: &UserId,
    email: Option<&str>,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        sub: user_id.to_string(),
        exp: now + ttl_secs,
        iat: Some(now),
        email: email.map(str::to_string),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
}
