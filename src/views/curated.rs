use crate::domain::NetworkError;
use crate::models::{Book, FeedbackAction, FeedbackEvent};

/// Books requested for the curated collection
pub const CURATED_COUNT: usize = 6;

/// "Your Curated Collection": a short, unfiltered list of top picks
#[derive(Debug, Clone)]
pub struct CuratedCollection {
    user_id: String,
    books: Vec<Book>,
    loading: bool,
}

impl CuratedCollection {
    /// Starts in the loading state; the shell issues the fetch on mount.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            books: Vec::new(),
            loading: true,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn apply_fetch(&mut self, result: Result<Vec<Book>, NetworkError>) {
        self.loading = false;
        match result {
            Ok(books) => self.books = books,
            Err(e) => tracing::warn!("Error fetching top picks: {}", e),
        }
    }

    /// Remove the book right away and return the feedback to send.
    pub fn rate(&mut self, book_id: i64, action: FeedbackAction) -> Option<FeedbackEvent> {
        let pos = self.books.iter().position(|b| b.id == book_id)?;
        self.books.remove(pos);
        Some(FeedbackEvent::new(self.user_id.clone(), book_id, action))
    }
}
