//! Mock session verifier for tests and local development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{InvalidSession, VerifiedSession};
use crate::ports::SessionVerifier;

/// Session verifier backed by a fixed token table.
#[derive(Default)]
pub struct MockSessionVerifier {
    sessions: RwLock<HashMap<String, VerifiedSession>>,
}

impl MockSessionVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token that verifies to the given session.
    pub fn with_session(self, token: impl Into<String>, session: VerifiedSession) -> Self {
        self.sessions
            .write()
            .unwrap()
            .insert(token.into(), session);
        self
    }
}

#[async_trait]
impl SessionVerifier for MockSessionVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedSession, InvalidSession> {
        self.sessions
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(InvalidSession)
    }
}
