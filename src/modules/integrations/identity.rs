//! Hosted identity provider integration
//!
//! Uses the provider's public REST surface (`accounts:*` endpoints keyed by the
//! project API key). Only the three calls the login form needs are wrapped.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::{AuthError, NetworkError};
use crate::infrastructure::config::IdentityConfig;
use crate::infrastructure::http::build_client;
use crate::models::FederatedCredential;

const UNREACHABLE: &str = "Could not reach the sign-in service. Try again.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpRequest<'a> {
    post_body: String,
    request_uri: &'a str,
    return_idp_credential: bool,
    return_secure_token: bool,
}

/// Account returned by every successful sign-in call
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityAccount {
    pub local_id: String,
    pub id_token: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Clone, Debug)]
pub struct IdentityClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    request_uri: String,
}

impl IdentityClient {
    /// Returns `Ok(None)` when no API key is configured.
    pub fn from_config(
        config: &IdentityConfig,
        timeout: Duration,
    ) -> Result<Option<Self>, NetworkError> {
        let Some(api_key) = config.api_key.clone() else {
            tracing::warn!("IDENTITY_API_KEY not set; only demo sign-in is available");
            return Ok(None);
        };

        if let Some(project) = &config.project_id {
            tracing::debug!("Identity provider project: {}", project);
        }

        Ok(Some(Self {
            client: build_client(timeout)?,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key,
            request_uri: config.request_uri(),
        }))
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityAccount, AuthError> {
        self.call(
            "accounts:signInWithPassword",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
            UNREACHABLE,
        )
        .await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityAccount, AuthError> {
        self.call(
            "accounts:signUp",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
            UNREACHABLE,
        )
        .await
    }

    pub async fn sign_in_with_idp(
        &self,
        credential: &FederatedCredential,
    ) -> Result<IdentityAccount, AuthError> {
        let post_body = format!(
            "id_token={}&providerId={}",
            urlencoding::encode(&credential.id_token),
            urlencoding::encode(&credential.provider_id)
        );

        self.call(
            "accounts:signInWithIdp",
            &IdpRequest {
                post_body,
                request_uri: &self.request_uri,
                return_idp_credential: true,
                return_secure_token: true,
            },
            &format!("{} Login failed. Try again.", provider_label(&credential.provider_id)),
        )
        .await
    }

    async fn call<B: Serialize>(
        &self,
        method: &str,
        body: &B,
        unreachable: &str,
    ) -> Result<IdentityAccount, AuthError> {
        let url = format!("{}/{}", self.endpoint, method);
        tracing::debug!("Identity call: {}", method);

        let resp = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Identity provider unreachable: {}", e);
                AuthError::Provider(unreachable.to_string())
            })?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| AuthError::Provider(format!("Failed to read sign-in response: {}", e)))?;

        if !status.is_success() {
            let code = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|env| env.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status.as_u16()));
            tracing::warn!("Identity provider rejected {}: {}", method, code);
            return Err(map_provider_error(&code));
        }

        serde_json::from_str(&text)
            .map_err(|e| AuthError::Provider(format!("Unexpected sign-in response: {}", e)))
    }
}

/// Human name for a federated provider id: "google.com" -> "Google"
pub fn provider_label(provider_id: &str) -> String {
    let name = provider_id.trim().trim_end_matches(".com");
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Provider".to_string(),
    }
}

/// Translate provider error codes into banner text
pub fn map_provider_error(code: &str) -> AuthError {
    // Codes may carry a detail suffix: "WEAK_PASSWORD : Password should be ..."
    let (head, detail) = match code.split_once(" : ") {
        Some((head, detail)) => (head.trim(), Some(detail.trim())),
        None => (code.trim(), None),
    };

    match head {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            AuthError::InvalidCredentials("Invalid email or password.".to_string())
        }
        "EMAIL_EXISTS" => {
            AuthError::InvalidCredentials("An account already exists for this email.".to_string())
        }
        "INVALID_EMAIL" => {
            AuthError::InvalidCredentials("The email address is badly formatted.".to_string())
        }
        "WEAK_PASSWORD" => AuthError::InvalidCredentials(
            detail
                .unwrap_or("Password should be at least 6 characters.")
                .to_string(),
        ),
        "USER_DISABLED" => AuthError::Provider("This account has been disabled.".to_string()),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => {
            AuthError::Provider("Too many attempts. Try again later.".to_string())
        }
        "INVALID_IDP_RESPONSE" => {
            AuthError::InvalidCredentials("The provider credential was rejected.".to_string())
        }
        _ => AuthError::Provider(code.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_known_codes() {
        assert_eq!(
            map_provider_error("INVALID_LOGIN_CREDENTIALS"),
            AuthError::InvalidCredentials("Invalid email or password.".to_string())
        );
        assert_eq!(
            map_provider_error("WEAK_PASSWORD : Password should be at least 6 characters"),
            AuthError::InvalidCredentials("Password should be at least 6 characters".to_string())
        );
        assert_eq!(
            map_provider_error("QUOTA_EXCEEDED").message(),
            "QUOTA_EXCEEDED"
        );
    }

    #[test]
    fn test_provider_label() {
        assert_eq!(provider_label("google.com"), "Google");
        assert_eq!(provider_label("github.com"), "Github");
        assert_eq!(provider_label("apple"), "Apple");
        assert_eq!(provider_label(""), "Provider");
    }

    #[test]
    fn test_missing_key_disables_client() {
        let config = IdentityConfig {
            api_key: None,
            auth_domain: None,
            project_id: None,
            endpoint: "http://localhost:9099".to_string(),
        };
        let client = IdentityClient::from_config(&config, Duration::from_secs(1)).unwrap();
        assert!(client.is_none());
    }
}
