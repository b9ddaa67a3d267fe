//! Repository trait definitions
//!
//! These traits define the contract for everything the views read from or
//! write to the outside world. Implementations live in the integrations layer;
//! tests substitute in-memory fakes.

use async_trait::async_trait;

use super::{AuthError, NetworkError};
use crate::models::{Book, FederatedCredential, FeedbackEvent, HistoryEntry, Session};

/// Source of ranked book lists
#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    /// Fetch `count` ranked books, restricted to `genres` when non-empty
    async fn fetch_recommendations(
        &self,
        user_id: &str,
        count: usize,
        genres: &[String],
    ) -> Result<Vec<Book>, NetworkError>;
}

/// Destination of like/pass events
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    async fn submit_feedback(&self, event: &FeedbackEvent) -> Result<(), NetworkError>;
}

/// Source of a user's past decisions
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn fetch_history(&self, user_id: &str) -> Result<Vec<HistoryEntry>, NetworkError>;
}

/// Exchanges credentials for a [`Session`]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str)
    -> Result<Session, AuthError>;

    async fn sign_up_with_password(&self, email: &str, password: &str)
    -> Result<Session, AuthError>;

    async fn sign_in_with_federated_provider(
        &self,
        credential: &FederatedCredential,
    ) -> Result<Session, AuthError>;

    async fn sign_in_as_demo_user(&self) -> Result<Session, AuthError>;
}
