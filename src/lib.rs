//! Session-state reconciliation for the streaming platform's web clients:
//! cookie-derived classification, profile-detail probing against the
//! backend, and the auth gate state machine that decides what chrome to
//! render.

pub mod classifier;
pub mod config;
pub mod events;
pub mod gate;
pub mod models;
pub mod profile;
pub mod store;
pub mod utils;
