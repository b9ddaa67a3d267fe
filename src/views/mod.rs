//! View layer
//!
//! Each view is a plain state machine. Views never perform I/O themselves;
//! they return requests (fetch parameters, feedback events) that the
//! application shell executes, and accept the results back.

pub mod curated;
pub mod genre_selector;
pub mod history;
pub mod login;
pub mod navigator;
pub mod session;
pub mod swipe_deck;

pub use curated::CuratedCollection;
pub use genre_selector::GenreSelector;
pub use history::HistoryList;
pub use login::{AuthMode, LoginForm, LoginRequest};
pub use navigator::{Resolution, Route, ViewKind};
pub use session::SessionContext;
pub use swipe_deck::{DeckState, SwipeDeck, SwipeOutcome};
