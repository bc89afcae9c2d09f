//! Application layer: command handlers orchestrating ports.

pub mod billing;
