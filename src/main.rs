//! Diagnostic entry point: runs one gate check against the configured
//! backend using cookies taken from the environment, and prints the
//! resulting state.

use std::sync::Arc;

use tracing::info;

use sessiongate::config::{load_config, print_schema};
use sessiongate::events::SessionEvents;
use sessiongate::gate::{AuthGate, Trigger};
use sessiongate::models::{AUTH_TOKEN_COOKIE, IS_CREATOR_COOKIE, UUID_COOKIE};
use sessiongate::profile::ProfileResolver;
use sessiongate::store::{MemoryStore, SessionStore};
use sessiongate::utils::logger::init_logging;

/// Seed the jar from COOKIE_AUTH_TOKEN, COOKIE_UUID and COOKIE_IS_CREATOR.
fn store_from_env() -> MemoryStore {
    let store = MemoryStore::new();
    for (env_name, cookie) in [
        ("COOKIE_AUTH_TOKEN", AUTH_TOKEN_COOKIE),
        ("COOKIE_UUID", UUID_COOKIE),
        ("COOKIE_IS_CREATOR", IS_CREATOR_COOKIE),
    ] {
        if let Ok(value) = std::env::var(env_name) {
            store.set(cookie, &value);
        }
    }
    store
}

#[tokio::main]
async fn main() {
    if std::env::args().any(|arg| arg == "--schema") {
        print_schema();
        return;
    }

    let config = load_config();
    init_logging(&config.logging);

    let store: Arc<dyn SessionStore> = Arc::new(store_from_env());
    let resolver = ProfileResolver::from_config(&config.backend);
    let gate = AuthGate::new(store, resolver, SessionEvents::new(), &config.gate);

    info!("Initial cookie-derived state: {}", gate.state().as_str());
    let outcome = gate.check(Trigger::Mount).await;
    match outcome.redirect {
        Some(target) => println!("{} (redirect: {})", outcome.state.as_str(), target),
        None => println!("{}", outcome.state.as_str()),
    }
}
