pub mod outbox;

pub use outbox::{FeedbackOutbox, OutboxPolicy};
