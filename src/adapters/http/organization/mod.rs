//! Organization HTTP surface: the resolver's read endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;
