use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A like/pass decision on a single book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackAction {
    Like,
    Pass,
}

impl FeedbackAction {
    /// Path segment of the backend endpoint recording this action
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackAction::Like => "like",
            FeedbackAction::Pass => "pass",
        }
    }
}

impl fmt::Display for FeedbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "like" => Ok(FeedbackAction::Like),
            "pass" => Ok(FeedbackAction::Pass),
            other => Err(format!("Unknown action: {}", other)),
        }
    }
}

/// Feedback sent once per swipe or rating
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEvent {
    pub user_id: String,
    pub book_id: i64,
    pub action: FeedbackAction,
}

impl FeedbackEvent {
    pub fn new(user_id: impl Into<String>, book_id: i64, action: FeedbackAction) -> Self {
        Self {
            user_id: user_id.into(),
            book_id,
            action,
        }
    }

    pub fn payload(&self) -> FeedbackPayload<'_> {
        FeedbackPayload {
            user_id: &self.user_id,
            book_id: self.book_id,
        }
    }
}

/// JSON body of `POST /user/{id}/like|pass`
#[derive(Debug, Serialize)]
pub struct FeedbackPayload<'a> {
    pub user_id: &'a str,
    pub book_id: i64,
}
