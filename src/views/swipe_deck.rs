//! Swipe deck state machine
//!
//! `loading` on mount/refresh, `presenting(index)` while cards remain, `empty`
//! once the buffer is exhausted or a fetch came back empty or failed. After
//! [`SWIPE_LIMIT`] swipes the deck hands over to the curated collection no
//! matter how many cards are left.

use crate::domain::NetworkError;
use crate::models::{Book, FeedbackAction, FeedbackEvent};

/// Cards requested per fetch
pub const DECK_BATCH_SIZE: usize = 10;

/// Swipes per deck run before moving to the curated collection
pub const SWIPE_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckState {
    Loading,
    Presenting { index: usize },
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// Mount or explicit refresh: the buffer is cleared
    Reload,
    /// Background fetch after the buffer ran out
    Prefetch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Nothing was on screen
    Ignored,
    Advanced {
        event: FeedbackEvent,
        prefetch: bool,
    },
    /// The run is over; the shell moves on to the curated collection
    SessionComplete { event: FeedbackEvent },
}

/// Parameters of the fetch the shell should start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckFetch {
    pub user_id: String,
    pub count: usize,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SwipeDeck {
    user_id: String,
    genres: Vec<String>,
    cards: Vec<Book>,
    index: usize,
    swipe_count: u32,
    loading: bool,
    last_error: Option<NetworkError>,
}

impl SwipeDeck {
    pub fn new(user_id: impl Into<String>, genres: Vec<String>) -> Self {
        Self {
            user_id: user_id.into(),
            genres,
            cards: Vec::new(),
            index: 0,
            swipe_count: 0,
            loading: false,
            last_error: None,
        }
    }

    pub fn state(&self) -> DeckState {
        if self.index < self.cards.len() {
            DeckState::Presenting { index: self.index }
        } else if self.loading && self.cards.is_empty() {
            DeckState::Loading
        } else {
            DeckState::Empty
        }
    }

    pub fn begin_load(&mut self, kind: LoadKind) -> DeckFetch {
        if kind == LoadKind::Reload {
            self.cards.clear();
            self.index = 0;
        }
        self.loading = true;
        self.last_error = None;

        DeckFetch {
            user_id: self.user_id.clone(),
            count: DECK_BATCH_SIZE,
            genres: self.genres.clone(),
        }
    }

    pub fn apply_fetch(&mut self, result: Result<Vec<Book>, NetworkError>) {
        self.loading = false;
        match result {
            Ok(books) => {
                tracing::info!("Deck loaded {} books", books.len());
                self.cards = books;
                self.index = 0;
            }
            Err(e) => {
                tracing::warn!("Error fetching recommendations: {}", e);
                self.last_error = Some(e);
            }
        }
    }

    pub fn current(&self) -> Option<&Book> {
        self.cards.get(self.index)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.index)
    }

    pub fn swipe_count(&self) -> u32 {
        self.swipe_count
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&NetworkError> {
        self.last_error.as_ref()
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn swipe(&mut self, action: FeedbackAction) -> SwipeOutcome {
        let Some(book) = self.current() else {
            return SwipeOutcome::Ignored;
        };

        let event = FeedbackEvent::new(self.user_id.clone(), book.id, action);
        self.index += 1;
        self.swipe_count += 1;

        if self.swipe_count >= SWIPE_LIMIT {
            tracing::info!("Swipe limit reached after {} swipes", self.swipe_count);
            return SwipeOutcome::SessionComplete { event };
        }

        // Fetch more once the buffer is exhausted, unless a fetch is already running
        let prefetch = self.remaining() == 0 && !self.loading;
        if prefetch {
            tracing::debug!("Deck exhausted; prefetching");
        }

        SwipeOutcome::Advanced { event, prefetch }
    }
}
