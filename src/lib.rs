//! Lexcase - Multi-tenant legal case management backend
//!
//! This crate implements the billing entitlement and access gating core:
//! session verification, organization resolution, the subscription ledger,
//! billing webhook ingestion, and checkout initiation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
