use serde::{Deserialize, Serialize};

use super::feedback::FeedbackAction;

/// One past decision as returned by `/user/{id}/history`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub book_id: i64,
    pub action: FeedbackAction,
}

impl HistoryEntry {
    pub fn label(&self) -> &'static str {
        match self.action {
            FeedbackAction::Like => "Liked",
            FeedbackAction::Pass => "Passed",
        }
    }
}
