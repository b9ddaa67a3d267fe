use std::time::Duration;

use crate::domain::NetworkError;

const USER_AGENT: &str = concat!("BookSwipe/", env!("CARGO_PKG_VERSION"));

/// Shared reqwest client for backend and identity calls
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, NetworkError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| NetworkError::Request(format!("Failed to build client: {}", e)))
}

/// Read a successful JSON body, mapping non-2xx statuses and bad payloads
pub async fn read_json<T>(resp: reqwest::Response) -> Result<T, NetworkError>
where
    T: serde::de::DeserializeOwned,
{
    let status = resp.status();
    if !status.is_success() {
        return Err(NetworkError::Status(status.as_u16()));
    }

    let body = resp
        .text()
        .await
        .map_err(|e| NetworkError::Request(format!("Failed to read response body: {}", e)))?;

    serde_json::from_str(&body).map_err(|e| NetworkError::Decode(e.to_string()))
}
