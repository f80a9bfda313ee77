use serde_json::Value;

use crate::models::{ProfileKind, SessionSnapshot};

/// The backend signals "no profile row" only through a case-insensitive
/// substring of the response `message`, not a dedicated code. Fragile but
/// bit-exact contract; nothing above the endpoint layer string-matches.
pub const NOT_REGISTERED_MARKER: &str = "not registered";

/// What a single detail endpoint said about the session.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    /// A profile row exists; the payload is the raw detail object.
    Registered(Value),
    /// The backend answered but holds no profile row of this kind.
    NotRegistered,
    /// The backend answered and denied the session.
    Denied,
}

/// A profile detail endpoint must report the session's standing or a
/// transport-level error. Errors are strings; the resolver converts them
/// into an unreachable resolution rather than propagating them.
#[async_trait::async_trait]
pub trait DetailEndpoint: Send + Sync {
    fn kind(&self) -> ProfileKind;
    async fn fetch(&self, session: &SessionSnapshot) -> Result<DetailOutcome, String>;
}
