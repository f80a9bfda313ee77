use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which kind of profile row a registered user has. The backend keeps
/// viewer and creator records in separate tables with separate detail
/// endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Viewer,
    Creator,
}

impl ProfileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::Viewer => "viewer",
            ProfileKind::Creator => "creator",
        }
    }
}

/// A normalized profile as resolved from one of the detail endpoints.
///
/// The viewer and creator detail shapes diverge, so the payload is kept as
/// an opaque JSON object for the rendering layer to interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub kind: ProfileKind,
    pub detail: Value,
}

/// The outcome of one profile-detail fetch cycle, normalized across the
/// divergent endpoint responses.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileResolution {
    /// A profile row exists; the session is fully authenticated.
    Authenticated { profile: Profile },
    /// OTP-level authentication succeeded but no profile row exists yet.
    /// `preferred` is the kind of the last endpoint probed.
    NeedsSetup { preferred: ProfileKind },
    /// The backend answered and denied the session.
    Rejected,
    /// Transport or parse failure. Callers render as not-authenticated but
    /// must not clear cookies; the next trigger retries.
    Unreachable,
}
