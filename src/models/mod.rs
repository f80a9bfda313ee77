// This module re-exports the session and profile models for convenience,
// so we can "use crate::models::*;" easily.
pub mod profile;
pub mod session;

pub use profile::*;
pub use session::*;
