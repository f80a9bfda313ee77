pub mod base;
pub mod http_endpoint;
pub mod resolver;

// Re-export the endpoint and resolver types so code outside can do
// "use crate::profile::{DetailEndpoint, ProfileResolver};"
pub use base::{DetailEndpoint, DetailOutcome, NOT_REGISTERED_MARKER};
pub use http_endpoint::{DetailEndpointConfig, HttpDetailEndpoint};
pub use resolver::{BackendConfig, ProfileResolver};
