use tracing::{debug, info, warn};

use super::base::{DetailEndpoint, DetailOutcome};
use super::http_endpoint::{DetailEndpointConfig, HttpDetailEndpoint};
use crate::models::{Profile, ProfileKind, ProfileResolution, SessionSnapshot};

/// Backend endpoints for the profile resolver, viewer and creator.
#[derive(serde::Deserialize, serde::Serialize, Debug, schemars::JsonSchema, Clone)]
pub struct BackendConfig {
    pub viewer: DetailEndpointConfig,
    pub creator: DetailEndpointConfig,
}

/// Resolves the authoritative profile for a session by probing the detail
/// endpoints in order.
///
/// The probe order (viewer before creator) biases default treatment toward
/// viewers and is part of the contract, which is why the probes run
/// sequentially instead of racing.
pub struct ProfileResolver {
    endpoints: Vec<Box<dyn DetailEndpoint>>,
}

impl ProfileResolver {
    /// Build a resolver over an explicit endpoint chain, probed in order.
    pub fn new(endpoints: Vec<Box<dyn DetailEndpoint>>) -> Self {
        Self { endpoints }
    }

    /// Build the standard viewer-then-creator HTTP chain from config.
    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(vec![
            Box::new(HttpDetailEndpoint::new(ProfileKind::Viewer, &config.viewer)),
            Box::new(HttpDetailEndpoint::new(
                ProfileKind::Creator,
                &config.creator,
            )),
        ])
    }

    /// Run one probe cycle. Never returns an error: every failure is
    /// normalized into a [`ProfileResolution`] for the gate to act on. No
    /// retry, no backoff; a failed call is terminal for this cycle.
    pub async fn resolve(&self, session: &SessionSnapshot) -> ProfileResolution {
        let mut last_probed = None;

        for endpoint in &self.endpoints {
            let kind = endpoint.kind();
            last_probed = Some(kind);

            match endpoint.fetch(session).await {
                Ok(DetailOutcome::Registered(detail)) => {
                    debug!("{} detail endpoint returned a profile", kind.as_str());
                    return ProfileResolution::Authenticated {
                        profile: Profile { kind, detail },
                    };
                }
                Ok(DetailOutcome::NotRegistered) => {
                    debug!(
                        "{} detail endpoint reports no profile row, probing on",
                        kind.as_str()
                    );
                }
                Ok(DetailOutcome::Denied) => {
                    info!("{} detail endpoint denied the session", kind.as_str());
                    return ProfileResolution::Rejected;
                }
                Err(e) => {
                    warn!("{} detail probe failed: {}", kind.as_str(), e);
                    return ProfileResolution::Unreachable;
                }
            }
        }

        match last_probed {
            Some(preferred) => ProfileResolution::NeedsSetup { preferred },
            // An empty chain can only deny.
            None => ProfileResolution::Rejected,
        }
    }
}
