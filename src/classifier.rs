//! Pure cookie-triple classification.
//!
//! The classifier maps a [`SessionSnapshot`] to a [`SessionClass`] with no
//! network call and no error path, so the gate can derive an initial state
//! synchronously at mount and fall back to it when the backend is
//! unreachable.

use crate::models::{SessionClass, SessionSnapshot};

/// Classify a cookie snapshot.
///
/// `is_creator` wins outright when it holds one of its two legal values,
/// regardless of the other cookies. Any other value is malformed and
/// treated as absent. With `is_creator` absent, any remaining session
/// cookie signals an OTP flow that never reached profile setup.
pub fn classify(snapshot: &SessionSnapshot) -> SessionClass {
    match snapshot.is_creator.as_deref() {
        Some("0") => SessionClass::Viewer,
        Some("1") => SessionClass::Creator,
        _ => {
            if snapshot.auth_token.is_some() || snapshot.uuid.is_some() {
                SessionClass::PendingProfile
            } else {
                SessionClass::Anonymous
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(
        auth_token: Option<&str>,
        uuid: Option<&str>,
        is_creator: Option<&str>,
    ) -> SessionSnapshot {
        SessionSnapshot {
            auth_token: auth_token.map(str::to_string),
            uuid: uuid.map(str::to_string),
            is_creator: is_creator.map(str::to_string),
        }
    }

    /// is_creator = "0"/"1" decides the class regardless of the other two
    /// cookies' presence.
    #[test]
    fn test_is_creator_wins_regardless_of_other_cookies() {
        for (token, uuid) in [
            (None, None),
            (Some("abc"), None),
            (None, Some("123")),
            (Some("abc"), Some("123")),
        ] {
            assert_eq!(
                classify(&snapshot(token, uuid, Some("0"))),
                SessionClass::Viewer
            );
            assert_eq!(
                classify(&snapshot(token, uuid, Some("1"))),
                SessionClass::Creator
            );
        }
    }

    /// No cookie at all is anonymous.
    #[test]
    fn test_empty_triple_is_anonymous() {
        assert_eq!(classify(&snapshot(None, None, None)), SessionClass::Anonymous);
    }

    /// is_creator absent with any other session cookie present means the
    /// OTP flow is mid-way.
    #[test]
    fn test_other_cookie_without_is_creator_is_pending() {
        assert_eq!(
            classify(&snapshot(Some("abc"), None, None)),
            SessionClass::PendingProfile
        );
        assert_eq!(
            classify(&snapshot(None, Some("123"), None)),
            SessionClass::PendingProfile
        );
        assert_eq!(
            classify(&snapshot(Some("abc"), Some("123"), None)),
            SessionClass::PendingProfile
        );
    }

    /// A malformed is_creator value is treated as absent, never an error.
    #[test]
    fn test_malformed_is_creator_treated_as_absent() {
        assert_eq!(
            classify(&snapshot(None, None, Some("yes"))),
            SessionClass::Anonymous
        );
        assert_eq!(
            classify(&snapshot(Some("abc"), None, Some("2"))),
            SessionClass::PendingProfile
        );
    }
}
