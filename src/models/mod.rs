pub mod book;
pub mod feedback;
pub mod history;
pub mod session;

pub use book::Book;
pub use feedback::{FeedbackAction, FeedbackEvent};
pub use history::HistoryEntry;
pub use session::{FederatedCredential, Session};
