//! Authentication configuration
//!
//! Covers the signed session tokens and the access-gate path policy.
//! Session tokens are stateless HS256 JWTs; no server-side session store
//! is consulted on the request path.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration (session tokens + access gate)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign and verify session tokens (HS256)
    pub session_secret: SecretString,

    /// Cookie holding the session token. The `__Secure-` prefixed variant
    /// is also accepted, since browser environments vary in which one is set.
    #[serde(default = "default_cookie_name")]
    pub session_cookie: String,

    /// Login surface unauthenticated browser requests are redirected to
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Paths reachable without a session (exact match, or prefix followed
    /// by a path separator)
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
}

impl AuthConfig {
    /// Name of the secure variant of the session cookie.
    pub fn secure_session_cookie(&self) -> String {
        format!("__Secure-{}", self.session_cookie)
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_SESSION_SECRET"));
        }
        if self.session_secret.expose_secret().len() < 32 {
            return Err(ValidationError::SessionSecretTooShort);
        }
        if !self.login_path.starts_with('/') {
            return Err(ValidationError::InvalidLoginPath);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: SecretString::new(String::new()),
            session_cookie: default_cookie_name(),
            login_path: default_login_path(),
            public_paths: default_public_paths(),
        }
    }
}

fn default_cookie_name() -> String {
    "session_token".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_public_paths() -> Vec<String> {
    [
        "/",
        "/login",
        "/signup",
        "/api/auth",
        "/api/signup",
        "/favicon.ico",
        "/healthz",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}
