//! Service bundle handed to the application shell

use std::sync::Arc;

use crate::auth::SessionAdapter;
use crate::domain::{
    FeedbackSink, HistoryRepository, IdentityProvider, NetworkError, RecommendationRepository,
};
use crate::infrastructure::config::Config;
use crate::modules::integrations::{BackendClient, IdentityClient};

/// Everything the views may call, behind trait objects
#[derive(Clone)]
pub struct AppServices {
    /// Ranked book lists
    pub recommendations: Arc<dyn RecommendationRepository>,
    /// Like/pass delivery, used by the outbox
    pub feedback: Arc<dyn FeedbackSink>,
    /// Past decisions
    pub history: Arc<dyn HistoryRepository>,
    /// Sign-in
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppServices {
    /// Wire the HTTP implementations from configuration
    pub fn from_config(config: &Config) -> Result<Self, NetworkError> {
        let backend = BackendClient::new(&config.api_base_url, config.request_timeout)?;
        let identity = IdentityClient::from_config(&config.identity, config.request_timeout)?;

        tracing::info!("Backend: {}", backend.base_url());

        let backend = Arc::new(backend);
        Ok(Self {
            recommendations: backend.clone(),
            feedback: backend.clone(),
            history: backend.clone(),
            identity: Arc::new(SessionAdapter::new(identity, (*backend).clone())),
        })
    }
}
