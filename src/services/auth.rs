//! Session and user directory calls.

use serde_json::Value;

use crate::http::client::RequestClient;
use crate::http::envelope::Envelope;
use crate::http::error::ClientError;
use crate::http::request::OutboundRequest;
use crate::model::{Credentials, LoginResult, User};
use crate::services::resource_path;
use crate::storage::{KeyValueStore, KeyValueStoreExt, TOKEN_KEY};

pub struct AuthApi<'a> {
    client: &'a RequestClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a RequestClient) -> Self {
        Self { client }
    }

    /// Log in and persist the session token on success.
    ///
    /// Rejected credentials come back as a 401 envelope; the stored token is
    /// left untouched in that case.
    pub async fn login(&self, credentials: &Credentials) -> Result<Envelope<LoginResult>, ClientError> {
        let request = OutboundRequest::post("/auth/login").with_json(credentials)?;
        let envelope: Envelope<LoginResult> = self.client.call(request).await?;

        if let (true, Some(result)) = (envelope.is_success(), envelope.data.as_ref()) {
            self.client.store().set(TOKEN_KEY, Value::String(result.token.clone()))?;
            tracing::info!(email = %result.email, role = %result.role, "Logged in");
        } else {
            tracing::warn!(code = envelope.code, message = %envelope.message, "Login rejected");
        }
        Ok(envelope)
    }

    /// Forget the session token.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.client.store().remove(TOKEN_KEY)?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// The stored session token, if any.
    pub fn token(&self) -> Option<String> {
        self.client.store().get_string(TOKEN_KEY)
    }

    pub async fn users(&self) -> Result<Envelope<Vec<User>>, ClientError> {
        self.client.call(OutboundRequest::get("/users")).await
    }

    pub async fn user(&self, id: u64) -> Result<Envelope<User>, ClientError> {
        self.client
            .call(OutboundRequest::get(resource_path("/users", &id.to_string(), None)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::model::Credentials;
    use crate::services::testing::synthetic_client;

    fn admin() -> Credentials {
        Credentials {
            email: "admin@example.com".into(),
            password: "123456".into(),
        }
    }

    #[tokio::test]
    async fn test_login_stores_token_and_logout_clears() {
        let (client, _store) = synthetic_client();
        let auth = client.auth();
        assert!(auth.token().is_none());

        let envelope = auth.login(&admin()).await.unwrap();
        assert!(envelope.data.unwrap().is_admin());
        assert_eq!(auth.token().as_deref(), Some("mock-token-123456"));

        auth.logout().unwrap();
        assert!(auth.token().is_none());
    }

    #[tokio::test]
    async fn test_rejected_login_keeps_no_token() {
        let (client, _store) = synthetic_client();
        let envelope = client
            .auth()
            .login(&Credentials {
                email: "admin@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap();
        assert_eq!(envelope.code, 401);
        assert!(envelope.data.is_none());
        assert!(client.auth().token().is_none());
    }

    #[tokio::test]
    async fn test_user_directory() {
        let (client, _store) = synthetic_client();
        let users = client.auth().users().await.unwrap().data.unwrap();
        assert_eq!(users.len(), 3);
        let user = client.auth().user(42).await.unwrap().data.unwrap();
        assert_eq!(user.id, 42);
    }
}
