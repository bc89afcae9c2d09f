//! Session verification adapters.

mod jwt;
mod mock;

pub use jwt::{issue_session_token, JwtSessionVerifier};
pub use mock::MockSessionVerifier;
