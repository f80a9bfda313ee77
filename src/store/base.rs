use tracing::debug;

use crate::models::{
    ProfileKind, SessionSnapshot, AUTH_TOKEN_COOKIE, IS_CREATOR_COOKIE, UUID_COOKIE,
};

/// The SessionStore trait abstracts the browser cookie jar (get, set,
/// remove, clear) so the classifier and gate can be driven without a real
/// document object.
///
/// Operations are synchronous: cookie mutation is atomic at the
/// single-document level and there is one writer at a time per gate. Cross
/// tab races are reconciled through storage-sync triggers, not through the
/// store itself.
pub trait SessionStore: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&self, name: &str, value: &str);
    fn remove(&self, name: &str);
    /// Wipe every cookie, the session ones included. Used by logout and by
    /// session invalidation.
    fn clear(&self);

    /// Read the three session cookies at one instant.
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            auth_token: self.get(AUTH_TOKEN_COOKIE),
            uuid: self.get(UUID_COOKIE),
            is_creator: self.get(IS_CREATOR_COOKIE),
        }
    }
}

/// Record a successful OTP verification: the backend granted a token and a
/// user correlation id, but no profile row exists yet.
///
/// Together with [`apply_profile_created`] and the gate's logout these are
/// the only writers of the session cookies.
pub fn apply_otp_verified(store: &dyn SessionStore, auth_token: &str, uuid: &str) {
    debug!("Recording OTP-verified session for uuid='{}'", uuid);
    store.set(AUTH_TOKEN_COOKIE, auth_token);
    store.set(UUID_COOKIE, uuid);
}

/// Record that profile setup completed, promoting the session to a fully
/// registered viewer or creator.
pub fn apply_profile_created(store: &dyn SessionStore, kind: ProfileKind) {
    let flag = match kind {
        ProfileKind::Viewer => "0",
        ProfileKind::Creator => "1",
    };
    debug!("Promoting session to registered {}", kind.as_str());
    store.set(IS_CREATOR_COOKIE, flag);
}
