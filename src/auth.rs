//! Session/identity adapter
//!
//! Turns the identity provider's accounts and the backend's demo shortcut into
//! a [`Session`]. One attempt per call, no retry.

use async_trait::async_trait;

use crate::domain::{AuthError, IdentityProvider};
use crate::modules::integrations::identity::IdentityAccount;
use crate::modules::integrations::{BackendClient, IdentityClient};
use crate::models::{FederatedCredential, Session};

pub const DEMO_DISPLAY_NAME: &str = "Demo User";
const DEMO_FAILURE: &str = "Demo login failed. Is the backend running?";

pub struct SessionAdapter {
    identity: Option<IdentityClient>,
    backend: BackendClient,
}

impl SessionAdapter {
    pub fn new(identity: Option<IdentityClient>, backend: BackendClient) -> Self {
        Self { identity, backend }
    }

    fn identity(&self) -> Result<&IdentityClient, AuthError> {
        self.identity.as_ref().ok_or(AuthError::NotConfigured)
    }
}

fn session_from_account(account: IdentityAccount, fallback_name: &str) -> Session {
    let display_name = account
        .display_name
        .filter(|n| !n.is_empty())
        .or(account.email)
        .unwrap_or_else(|| fallback_name.to_string());

    Session {
        user_id: account.local_id,
        token: account.id_token,
        display_name,
        photo_url: account.photo_url,
    }
}

#[async_trait]
impl IdentityProvider for SessionAdapter {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        tracing::info!("Password sign-in for {}", email);
        let mut account = self.identity()?.sign_in_with_password(email, password).await?;
        // Email accounts are shown by address
        account.display_name = None;
        Ok(session_from_account(account, email))
    }

    async fn sign_up_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        tracing::info!("Creating account for {}", email);
        let mut account = self.identity()?.sign_up(email, password).await?;
        account.display_name = None;
        Ok(session_from_account(account, email))
    }

    async fn sign_in_with_federated_provider(
        &self,
        credential: &FederatedCredential,
    ) -> Result<Session, AuthError> {
        tracing::info!("Federated sign-in via {}", credential.provider_id);
        let account = self.identity()?.sign_in_with_idp(credential).await?;
        Ok(session_from_account(account, &credential.provider_id))
    }

    async fn sign_in_as_demo_user(&self) -> Result<Session, AuthError> {
        tracing::info!("Demo sign-in against {}", self.backend.base_url());
        match self.backend.demo_login().await {
            Ok(login) => Ok(Session {
                user_id: login.user_id,
                token: login.token,
                display_name: DEMO_DISPLAY_NAME.to_string(),
                photo_url: None,
            }),
            Err(e) => {
                tracing::error!("Demo login failed: {}", e);
                Err(AuthError::Provider(DEMO_FAILURE.to_string()))
            }
        }
    }
}
