use crate::domain::NetworkError;
use crate::models::HistoryEntry;

#[derive(Debug, Clone)]
pub struct HistoryList {
    user_id: String,
    entries: Vec<HistoryEntry>,
    loading: bool,
}

impl HistoryList {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            entries: Vec::new(),
            loading: true,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn apply_fetch(&mut self, result: Result<Vec<HistoryEntry>, NetworkError>) {
        self.loading = false;
        match result {
            Ok(entries) => self.entries = entries,
            Err(e) => tracing::warn!("Error fetching history: {}", e),
        }
    }
}
