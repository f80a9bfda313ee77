use std::sync::Arc;

use sessiongate::config::GateConfig;
use sessiongate::events::SessionEvents;
use sessiongate::gate::AuthGate;
use sessiongate::profile::{BackendConfig, DetailEndpointConfig, ProfileResolver};
use sessiongate::store::MemoryStore;

/// Cookie jar pre-populated for a scenario.
pub fn seeded_store(cookies: &[(&str, &str)]) -> Arc<MemoryStore> {
    Arc::new(MemoryStore::seeded(cookies.iter().copied()))
}

/// The standard viewer/creator endpoint pair against a mock server.
pub fn backend_config(server_url: &str) -> BackendConfig {
    BackendConfig {
        viewer: DetailEndpointConfig {
            uri: format!("{}/viewer/detail", server_url),
            detail_field: "viewerDetail".to_string(),
        },
        creator: DetailEndpointConfig {
            uri: format!("{}/creator/detail", server_url),
            detail_field: "creatorDetail".to_string(),
        },
    }
}

/// Build a gate wired to a mock backend, returning the event bus too.
pub fn build_gate(server_url: &str, store: Arc<MemoryStore>) -> (AuthGate, SessionEvents) {
    let events = SessionEvents::new();
    let resolver = ProfileResolver::from_config(&backend_config(server_url));
    let gate = AuthGate::new(store, resolver, events.clone(), &GateConfig::default());
    (gate, events)
}
