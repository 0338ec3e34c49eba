//! Logout Notification
//!
//! Best-effort notification to an external auth service when a session is
//! cleared. Fire-and-forget: the local clear never waits on, and is never
//! reversed by, the outcome here.

use async_trait::async_trait;
use cb_common::Identity;
use serde::Serialize;
use std::time::Duration;

use crate::error::Result;

/// Collaborator notified when a session logs out.
#[async_trait]
pub trait LogoutNotifier: Send + Sync {
    async fn notify(&self, identity: &Identity) -> Result<()>;
}

/// No-op notifier for dev mode and tests.
pub struct NoopLogoutNotifier;

#[async_trait]
impl LogoutNotifier for NoopLogoutNotifier {
    async fn notify(&self, _identity: &Identity) -> Result<()> {
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogoutNotification<'a> {
    principal_id: &'a str,
    credential_ref: &'a str,
}

/// HTTP notifier posting to the configured auth-service URL.
pub struct HttpLogoutNotifier {
    client: reqwest::Client,
    url: String,
}

impl HttpLogoutNotifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl LogoutNotifier for HttpLogoutNotifier {
    async fn notify(&self, identity: &Identity) -> Result<()> {
        let body = LogoutNotification {
            principal_id: &identity.id,
            credential_ref: &identity.credential_ref,
        };
        self.client
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn posts_identity_to_configured_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = HttpLogoutNotifier::new(
            format!("{}/auth/logout", server.uri()),
            Duration::from_millis(500),
        )
        .unwrap();

        let identity = Identity::new("Ada Carer", "carers/ada");
        notifier.notify(&identity).await.unwrap();
    }

    #[tokio::test]
    async fn server_error_surfaces_as_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let notifier =
            HttpLogoutNotifier::new(server.uri(), Duration::from_millis(500)).unwrap();
        let identity = Identity::new("Ada Carer", "carers/ada");
        assert!(notifier.notify(&identity).await.is_err());
    }
}
