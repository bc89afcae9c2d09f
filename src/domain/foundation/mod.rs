//! Foundation types shared across the domain.

mod auth;
mod errors;
mod ids;

pub use auth::{InvalidSession, VerifiedSession};
pub use errors::{DomainError, ErrorCode};
pub use ids::{OrganizationId, UserId};
