pub mod base;
pub mod memory_store;

// Re-export the primary store items so code outside can do
// "use crate::store::{SessionStore, MemoryStore};"
pub use base::{apply_otp_verified, apply_profile_created, SessionStore};
pub use memory_store::MemoryStore;
