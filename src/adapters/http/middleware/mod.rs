//! HTTP middleware: the access gate and the session layer.

mod access_gate;
mod cookies;
mod session;

pub use access_gate::{access_gate, AccessGateConfig};
pub use session::{session_middleware, RequireSession, SessionLayer, SessionRejection};
