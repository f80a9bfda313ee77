//! The auth gate: decides per trigger whether to show authenticated or
//! anonymous chrome, and whether to invalidate the session.
//!
//! One gate instance per UI surface. The gate never errors; every fetch
//! failure is absorbed into a state transition.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::classifier::classify;
use crate::config::GateConfig;
use crate::events::{AuthEvent, SessionEvents};
use crate::models::{ProfileKind, ProfileResolution, SessionClass};
use crate::profile::ProfileResolver;
use crate::store::SessionStore;
use crate::utils::log_throttle::should_emit;

/// What chrome to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    Anonymous,
    PendingSetup,
    Authenticated,
}

impl GateState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateState::Anonymous => "anonymous",
            GateState::PendingSetup => "pending_setup",
            GateState::Authenticated => "authenticated",
        }
    }
}

/// The events that warrant a reconcile cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Component mounted.
    Mount,
    /// The tab regained visibility.
    VisibilityRegain,
    /// An auth-changed notification arrived on the bus.
    AuthChanged,
    /// Another tab mutated shared storage.
    StorageSync,
}

/// The result of one check: the state to render and, when profile setup is
/// pending, where to send the user and which signup flow (viewer or
/// creator) to offer them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub state: GateState,
    pub redirect: Option<String>,
    /// The profile kind the resolver last probed when setup is pending, so
    /// the caller can route to the matching signup flow.
    pub preferred: Option<ProfileKind>,
}

impl GateOutcome {
    fn state_only(state: GateState) -> Self {
        GateOutcome {
            state,
            redirect: None,
            preferred: None,
        }
    }
}

struct GateInner {
    state: GateState,
    in_flight: bool,
    last_verified: Option<Instant>,
    verified_class: Option<SessionClass>,
}

// Distinguishes the log-throttle windows of coexisting gate instances.
static NEXT_GATE_ID: AtomicU64 = AtomicU64::new(0);

/// Reconciles cookie-implied session state with server truth.
pub struct AuthGate {
    store: Arc<dyn SessionStore>,
    resolver: ProfileResolver,
    events: SessionEvents,
    cooldown: Duration,
    pending_redirect: String,
    skip_log_key: String,
    inner: Mutex<GateInner>,
}

/// Resets the in-flight flag when a check cycle ends, including when the
/// future is dropped mid-fetch on unmount.
struct InFlightReset<'a> {
    gate: &'a AuthGate,
}

impl Drop for InFlightReset<'_> {
    fn drop(&mut self) {
        self.gate.lock_inner().in_flight = false;
    }
}

impl AuthGate {
    /// Build a gate. The initial state is derived synchronously from the
    /// cookie jar, before any network round trip, so the first render never
    /// flashes the wrong chrome.
    pub fn new(
        store: Arc<dyn SessionStore>,
        resolver: ProfileResolver,
        events: SessionEvents,
        config: &GateConfig,
    ) -> Self {
        let initial = Self::state_from_class(classify(&store.snapshot()));
        debug!("Gate mounted in state '{}'", initial.as_str());
        AuthGate {
            store,
            resolver,
            events,
            cooldown: Duration::from_secs(config.cooldown_seconds),
            pending_redirect: config.pending_setup_redirect.clone(),
            skip_log_key: format!(
                "gate.{}.cooldown.skip",
                NEXT_GATE_ID.fetch_add(1, Ordering::Relaxed)
            ),
            inner: Mutex::new(GateInner {
                state: initial,
                in_flight: false,
                last_verified: None,
                verified_class: None,
            }),
        }
    }

    fn lock_inner(&self) -> MutexGuard<'_, GateInner> {
        self.inner.lock().expect("gate state mutex poisoned")
    }

    fn state_from_class(class: SessionClass) -> GateState {
        match class {
            SessionClass::Anonymous => GateState::Anonymous,
            SessionClass::PendingProfile => GateState::PendingSetup,
            SessionClass::Viewer | SessionClass::Creator => GateState::Authenticated,
        }
    }

    /// The state as of the last completed transition.
    pub fn state(&self) -> GateState {
        self.lock_inner().state
    }

    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    /// Run one reconcile cycle for a trigger.
    ///
    /// At most one profile fetch is in flight per gate; a trigger arriving
    /// while one is pending is dropped, not queued. While the classifier
    /// keeps reporting the same registered class that was last verified,
    /// re-checks within the cooldown window skip the network entirely.
    pub async fn check(&self, trigger: Trigger) -> GateOutcome {
        let snapshot = self.store.snapshot();
        let class = classify(&snapshot);

        {
            let mut inner = self.lock_inner();
            if inner.in_flight {
                debug!(
                    "Dropping trigger {:?}: a profile fetch is already in flight",
                    trigger
                );
                return GateOutcome::state_only(inner.state);
            }
            if class.is_registered()
                && inner.verified_class == Some(class)
                && inner
                    .last_verified
                    .map(|at| at.elapsed() < self.cooldown)
                    .unwrap_or(false)
            {
                if let Some(suppressed_count) = should_emit(&self.skip_log_key, self.cooldown) {
                    debug!(
                        suppressed_count,
                        "Skipping profile fetch inside the cooldown window"
                    );
                }
                return GateOutcome::state_only(inner.state);
            }
            inner.in_flight = true;
        }
        let _reset = InFlightReset { gate: self };

        let resolution = self.resolver.resolve(&snapshot).await;

        let mut inner = self.lock_inner();
        let mut redirect = None;
        let mut pending_kind = None;
        match resolution {
            ProfileResolution::Authenticated { profile } => {
                info!("Session verified as {}", profile.kind.as_str());
                inner.state = GateState::Authenticated;
                inner.last_verified = Some(Instant::now());
                inner.verified_class = Some(class);
            }
            ProfileResolution::NeedsSetup { preferred } => {
                info!(
                    "Session authenticated but profile setup pending (preferred: {})",
                    preferred.as_str()
                );
                inner.state = GateState::PendingSetup;
                inner.last_verified = None;
                inner.verified_class = None;
                redirect = Some(self.pending_redirect.clone());
                pending_kind = Some(preferred);
            }
            ProfileResolution::Rejected => {
                if class.is_registered() {
                    // The backend explicitly denied a session the cookies
                    // call registered: invalidate it.
                    info!("Registered session rejected by backend, clearing cookies");
                    self.store.clear();
                    self.events.publish(AuthEvent::AuthChanged);
                } else {
                    debug!("Unregistered session rejected, no cookies to clear");
                }
                inner.state = GateState::Anonymous;
                inner.last_verified = None;
                inner.verified_class = None;
            }
            ProfileResolution::Unreachable => {
                // Optimistic fallback to the cookie-derived state. The
                // cooldown stays unarmed so the next trigger retries.
                warn!(
                    "Profile fetch unreachable, falling back to cookie class {:?}",
                    class
                );
                inner.state = Self::state_from_class(class);
            }
        }
        GateOutcome {
            state: inner.state,
            redirect,
            preferred: pending_kind,
        }
    }

    /// Log out from any state: clear the jar, announce the change, go
    /// anonymous. Terminal for this session; a fresh OTP flow must create a
    /// new one.
    pub fn logout(&self) {
        info!("Logging out, clearing session cookies");
        self.store.clear();
        self.events.publish(AuthEvent::AuthChanged);
        let mut inner = self.lock_inner();
        inner.state = GateState::Anonymous;
        inner.last_verified = None;
        inner.verified_class = None;
    }
}
