//! BookSwipe backend integration
//!
//! Thin REST client over the recommendation service: demo login, ranked
//! recommendations, like/pass feedback and per-user history.

use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use crate::domain::{FeedbackSink, HistoryRepository, NetworkError, RecommendationRepository};
use crate::infrastructure::http::{build_client, read_json};
use crate::models::book::BookRecord;
use crate::models::session::DemoLogin;
use crate::models::{Book, FeedbackEvent, HistoryEntry};

#[derive(Clone, Debug)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, NetworkError> {
        let parsed = Url::parse(base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(NetworkError::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn user_endpoint(&self, user_id: &str, tail: &str) -> String {
        format!(
            "{}/user/{}/{}",
            self.base_url,
            urlencoding::encode(user_id),
            tail
        )
    }

    pub async fn demo_login(&self) -> Result<DemoLogin, NetworkError> {
        let url = format!("{}/auth/demo-login", self.base_url);
        tracing::debug!("POST {}", url);

        let resp = self.client.post(&url).send().await?;
        read_json(resp).await
    }
}

#[async_trait]
impl RecommendationRepository for BackendClient {
    async fn fetch_recommendations(
        &self,
        user_id: &str,
        count: usize,
        genres: &[String],
    ) -> Result<Vec<Book>, NetworkError> {
        let url = format!("{}/recommend", self.base_url);

        let mut query = vec![
            ("user_id", user_id.to_string()),
            ("n", count.to_string()),
        ];
        if !genres.is_empty() {
            query.push(("genres", genres.join(",")));
        }

        tracing::debug!("GET {} user={} n={} genres={:?}", url, user_id, count, genres);

        let resp = self.client.get(&url).query(&query).send().await?;
        let records: Vec<BookRecord> = read_json(resp).await?;

        tracing::debug!("Backend returned {} recommendations", records.len());
        Ok(records.into_iter().map(Book::from).collect())
    }
}

#[async_trait]
impl FeedbackSink for BackendClient {
    async fn submit_feedback(&self, event: &FeedbackEvent) -> Result<(), NetworkError> {
        let url = self.user_endpoint(&event.user_id, event.action.as_str());
        tracing::debug!("POST {} book={}", url, event.book_id);

        let resp = self.client.post(&url).json(&event.payload()).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NetworkError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl HistoryRepository for BackendClient {
    async fn fetch_history(&self, user_id: &str) -> Result<Vec<HistoryEntry>, NetworkError> {
        let url = self.user_endpoint(user_id, "history");
        tracing::debug!("GET {}", url);

        let resp = self.client.get(&url).send().await?;
        read_json(resp).await
    }
}
