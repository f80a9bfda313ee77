use serde::{Deserialize, Serialize};

// Cookie names are a bit-exact contract shared with the web clients.
pub const AUTH_TOKEN_COOKIE: &str = "auth_token";
pub const UUID_COOKIE: &str = "uuid";
pub const IS_CREATOR_COOKIE: &str = "is_creator";
/// Opaque JSON blob written alongside the session cookies. Informational
/// only; nothing in the reconciliation logic reads it.
pub const USER_DATA_COOKIE: &str = "user_data";

/// The values of the three meaningful session cookies, read at one instant.
///
/// The cookie jar is the source of truth; a snapshot is re-derived on every
/// check rather than cached, so a snapshot is only valid for the check cycle
/// that took it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub auth_token: Option<String>,
    pub uuid: Option<String>,
    pub is_creator: Option<String>,
}

impl SessionSnapshot {
    /// Render the snapshot as a `Cookie` request header value, or None when
    /// no cookie is set.
    pub fn cookie_header(&self) -> Option<String> {
        let mut pairs = Vec::new();
        if let Some(token) = &self.auth_token {
            pairs.push(format!("{}={}", AUTH_TOKEN_COOKIE, token));
        }
        if let Some(uuid) = &self.uuid {
            pairs.push(format!("{}={}", UUID_COOKIE, uuid));
        }
        if let Some(flag) = &self.is_creator {
            pairs.push(format!("{}={}", IS_CREATOR_COOKIE, flag));
        }
        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }
}

/// What the cookie triple says about the session, before any server round
/// trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionClass {
    /// No session cookie at all.
    Anonymous,
    /// OTP verified but no profile row yet: `is_creator` unset while some
    /// other session cookie is present.
    PendingProfile,
    /// `is_creator == "0"`.
    Viewer,
    /// `is_creator == "1"`.
    Creator,
}

impl SessionClass {
    /// Viewer and Creator are fully registered sessions; the other two
    /// classes have no profile row behind them.
    pub fn is_registered(&self) -> bool {
        matches!(self, SessionClass::Viewer | SessionClass::Creator)
    }
}
