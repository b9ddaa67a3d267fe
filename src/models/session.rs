use serde::{Deserialize, Serialize};

/// Authenticated identity held for the lifetime of the process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub token: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Response of `POST /auth/demo-login`
#[derive(Debug, Deserialize)]
pub struct DemoLogin {
    pub user_id: String,
    pub token: String,
}

/// Credential handed over by a federated provider (e.g. a Google id token)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedCredential {
    pub provider_id: String,
    pub id_token: String,
}

impl FederatedCredential {
    pub fn google(id_token: impl Into<String>) -> Self {
        Self {
            provider_id: "google.com".to_string(),
            id_token: id_token.into(),
        }
    }
}
