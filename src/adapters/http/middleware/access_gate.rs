//! Access gate middleware.
//!
//! The request-path decision made before any business logic runs:
//!
//! - Public paths (exact or prefix match against a fixed allowlist) pass
//!   unconditionally.
//! - API paths pass through to the session layer, which answers `401`;
//!   redirects are a browser-navigation affordance, not an API contract.
//! - Remaining (page) requests without a session cookie are redirected to
//!   the login surface with the original path preserved as a
//!   `redirect` query parameter. The redirect carries no side effects and
//!   is idempotent under repeated requests.
//!
//! The gate only checks cookie *presence*. Cryptographic verification is
//! deferred to the session layer, which runs when business logic actually
//! consumes the identity.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::config::AuthConfig;

use super::cookies::session_token;

/// Path policy and cookie names for the access gate.
#[derive(Debug, Clone)]
pub struct AccessGateConfig {
    public_paths: Vec<String>,
    login_path: String,
    session_cookie: String,
    secure_session_cookie: String,
}

impl AccessGateConfig {
    /// Build the gate configuration from auth settings.
    pub fn from_auth(auth: &AuthConfig) -> Self {
        Self {
            public_paths: auth.public_paths.clone(),
            login_path: auth.login_path.clone(),
            session_cookie: auth.session_cookie.clone(),
            secure_session_cookie: auth.secure_session_cookie(),
        }
    }

    /// Whether the path is on the public allowlist: an exact entry, or
    /// under an entry treated as a prefix.
    fn is_public(&self, path: &str) -> bool {
        self.public_paths
            .iter()
            .any(|p| path == p || path.starts_with(&format!("{}/", p)))
    }

    fn is_api(&self, path: &str) -> bool {
        path.starts_with("/api/")
    }
}

/// Gate every inbound request before routing reaches business logic.
pub async fn access_gate(
    State(config): State<Arc<AccessGateConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if config.is_public(&path) || config.is_api(&path) {
        return next.run(request).await;
    }

    let has_cookie = session_token(
        request.headers(),
        &config.session_cookie,
        &config.secure_session_cookie,
    )
    .is_some();

    if has_cookie {
        return next.run(request).await;
    }

    let target = format!("{}?redirect={}", config.login_path, path);
    Redirect::temporary(&target).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate_config() -> AccessGateConfig {
        AccessGateConfig::from_auth(&AuthConfig::default())
    }

    #[test]
    fn root_is_public_but_not_a_prefix() {
        let config = gate_config();
        assert!(config.is_public("/"));
        assert!(!config.is_public("/dashboard"));
    }

    #[test]
    fn allowlist_entries_match_exactly_and_as_prefixes() {
        let config = gate_config();
        assert!(config.is_public("/login"));
        assert!(config.is_public("/signup"));
        assert!(config.is_public("/api/auth"));
        assert!(config.is_public("/api/auth/signin"));
        assert!(config.is_public("/api/auth/callback"));
    }

    #[test]
    fn prefix_match_requires_path_separator() {
        let config = gate_config();
        // "/loginfoo" must not ride on the "/login" entry.
        assert!(!config.is_public("/loginfoo"));
    }

    #[test]
    fn api_paths_are_deferred_to_the_session_layer() {
        let config = gate_config();
        assert!(config.is_api("/api/billing/status"));
        assert!(!config.is_api("/dashboard"));
    }
}
