use std::env;
use std::time::Duration;

use crate::sync::outbox::OutboxPolicy;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_IDENTITY_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";

/// Project credentials for the hosted identity service
#[derive(Clone, Debug)]
pub struct IdentityConfig {
    pub api_key: Option<String>,
    pub auth_domain: Option<String>,
    pub project_id: Option<String>,
    pub endpoint: String,
}

impl IdentityConfig {
    /// Redirect URI the provider expects on federated sign-in
    pub fn request_uri(&self) -> String {
        match &self.auth_domain {
            Some(domain) => format!("https://{}/__/auth/handler", domain),
            None => "http://localhost".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub identity: IdentityConfig,
    pub request_timeout: Duration,
    pub outbox: OutboxPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let defaults = OutboxPolicy::default();

        Self {
            api_base_url: get("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            identity: IdentityConfig {
                api_key: get("IDENTITY_API_KEY"),
                auth_domain: get("IDENTITY_AUTH_DOMAIN"),
                project_id: get("IDENTITY_PROJECT_ID"),
                endpoint: get("IDENTITY_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_IDENTITY_ENDPOINT.to_string()),
            },
            request_timeout: get("REQUEST_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(10)),
            outbox: OutboxPolicy {
                max_attempts: get("FEEDBACK_MAX_ATTEMPTS")
                    .and_then(|s| s.parse().ok())
                    .filter(|n: &u32| *n > 0)
                    .unwrap_or(defaults.max_attempts),
                retry_delay: get("FEEDBACK_RETRY_DELAY_MS")
                    .and_then(|s| s.parse().ok())
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.retry_delay),
                delivered_retention: get("FEEDBACK_DELIVERED_RETENTION")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.delivered_retention),
            },
        }
    }
}
