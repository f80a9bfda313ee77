use reqwest::StatusCode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::base::{DetailEndpoint, DetailOutcome, NOT_REGISTERED_MARKER};
use crate::models::{ProfileKind, SessionSnapshot};

/// The config needed for one backend detail endpoint.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct DetailEndpointConfig {
    /// Full URL of the detail endpoint.
    pub uri: String,
    /// Name of the field carrying the profile object in a successful
    /// response, e.g. "viewerDetail" or "creatorDetail".
    pub detail_field: String,
}

/// A detail endpoint backed by an HTTP GET with the session cookies
/// attached.
pub struct HttpDetailEndpoint {
    kind: ProfileKind,
    config: DetailEndpointConfig,
    client: reqwest::Client,
}

impl HttpDetailEndpoint {
    pub fn new(kind: ProfileKind, config: &DetailEndpointConfig) -> Self {
        info!(
            "Creating {} detail endpoint for uri='{}'",
            kind.as_str(),
            config.uri
        );
        Self {
            kind,
            config: config.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// Map a 2xx response body to an outcome. The body shape is
    /// `{status, message?, <detail_field>?}` with divergent detail fields
    /// per endpoint.
    fn classify_body(&self, body: &Value) -> DetailOutcome {
        let detail = &body[self.config.detail_field.as_str()];
        if detail.is_object() {
            return DetailOutcome::Registered(detail.clone());
        }

        let message = body["message"].as_str().unwrap_or_default();
        if message.to_lowercase().contains(NOT_REGISTERED_MARKER) {
            return DetailOutcome::NotRegistered;
        }

        if body["status"].as_bool() == Some(false) {
            return DetailOutcome::Denied;
        }

        // 2xx without a detail row and without an explicit denial: no
        // profile of this kind exists.
        DetailOutcome::NotRegistered
    }
}

#[async_trait::async_trait]
impl DetailEndpoint for HttpDetailEndpoint {
    fn kind(&self) -> ProfileKind {
        self.kind
    }

    async fn fetch(&self, session: &SessionSnapshot) -> Result<DetailOutcome, String> {
        let mut request = self.client.get(&self.config.uri);
        if let Some(cookies) = session.cookie_header() {
            request = request.header(reqwest::header::COOKIE, cookies);
        }

        debug!(
            "Sending {} detail request to: {}",
            self.kind.as_str(),
            self.config.uri
        );
        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => return Err(format!("Error sending request: {}", e)),
        };

        let status = response.status();
        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| format!("Error reading response body: {}", e))?;
            let body: Value =
                serde_json::from_str(&body).map_err(|e| format!("Error parsing JSON: {}", e))?;
            Ok(self.classify_body(&body))
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!(
                "{} detail endpoint denied the session: {}",
                self.kind.as_str(),
                status
            );
            Ok(DetailOutcome::Denied)
        } else {
            // Server-side blips are transport-class failures, so a 5xx
            // never invalidates a registered session.
            Err(format!("Unexpected status code: {}", status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use tokio;

    fn endpoint(uri: String, kind: ProfileKind, detail_field: &str) -> HttpDetailEndpoint {
        HttpDetailEndpoint::new(
            kind,
            &DetailEndpointConfig {
                uri,
                detail_field: detail_field.to_string(),
            },
        )
    }

    fn registered_session() -> SessionSnapshot {
        SessionSnapshot {
            auth_token: Some("abc".to_string()),
            uuid: Some("123".to_string()),
            is_creator: Some("0".to_string()),
        }
    }

    /// Test that a response carrying the detail object maps to Registered
    /// and that the session cookies ride along on the request.
    #[tokio::test]
    async fn test_registered_response_with_cookies() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/viewer/detail")
            .match_header("cookie", "auth_token=abc; uuid=123; is_creator=0")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": true, "viewerDetail": {"name": "v"}}"#)
            .create_async()
            .await;

        let uri = format!("{}/viewer/detail", server.url());
        let ep = endpoint(uri, ProfileKind::Viewer, "viewerDetail");
        let outcome = ep.fetch(&registered_session()).await.unwrap();
        m.assert_async().await;

        match outcome {
            DetailOutcome::Registered(detail) => assert_eq!(detail["name"], "v"),
            other => panic!("expected Registered, got {:?}", other),
        }
    }

    /// Test the fragile "not registered" substring contract, including its
    /// case-insensitivity.
    #[tokio::test]
    async fn test_not_registered_substring_match() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/viewer/detail")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": true, "message": "User is NOT Registered"}"#)
            .create_async()
            .await;

        let uri = format!("{}/viewer/detail", server.url());
        let ep = endpoint(uri, ProfileKind::Viewer, "viewerDetail");
        let outcome = ep.fetch(&registered_session()).await.unwrap();
        m.assert_async().await;
        assert_eq!(outcome, DetailOutcome::NotRegistered);
    }

    /// Test that an explicit status:false without the substring is a
    /// denial.
    #[tokio::test]
    async fn test_status_false_is_denied() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/creator/detail")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": false, "message": "invalid session"}"#)
            .create_async()
            .await;

        let uri = format!("{}/creator/detail", server.url());
        let ep = endpoint(uri, ProfileKind::Creator, "creatorDetail");
        let outcome = ep.fetch(&registered_session()).await.unwrap();
        m.assert_async().await;
        assert_eq!(outcome, DetailOutcome::Denied);
    }

    /// Test that a 401 maps to Denied while a 500 maps to a transport
    /// error.
    #[tokio::test]
    async fn test_http_status_mapping() {
        let mut server = Server::new_async().await;
        let m401 = server
            .mock("GET", "/a")
            .with_status(401)
            .create_async()
            .await;
        let m500 = server
            .mock("GET", "/b")
            .with_status(500)
            .create_async()
            .await;

        let denied = endpoint(format!("{}/a", server.url()), ProfileKind::Viewer, "viewerDetail")
            .fetch(&registered_session())
            .await;
        let errored = endpoint(format!("{}/b", server.url()), ProfileKind::Viewer, "viewerDetail")
            .fetch(&registered_session())
            .await;

        m401.assert_async().await;
        m500.assert_async().await;
        assert_eq!(denied.unwrap(), DetailOutcome::Denied);
        assert!(errored.is_err());
    }

    /// Test that an unparseable body is a transport-class error.
    #[tokio::test]
    async fn test_malformed_body_is_error() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/viewer/detail")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let uri = format!("{}/viewer/detail", server.url());
        let ep = endpoint(uri, ProfileKind::Viewer, "viewerDetail");
        let result = ep.fetch(&registered_session()).await;
        m.assert_async().await;
        assert!(result.is_err());
    }
}
