use serde::{Deserialize, Serialize};

/// Placeholder the backend uses for books without a blurb
const NO_DESCRIPTION: &str = "<no description>";

/// Number of genre tags shown on a card
const CARD_TAG_LIMIT: usize = 3;

// Wire shape returned by `/recommend`
#[derive(Debug, Deserialize)]
pub struct BookRecord {
    pub book_id: i64,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genres: Option<GenreField>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Genres arrive space-joined from the ranking service, but a list is accepted too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GenreField {
    Joined(String),
    List(Vec<String>),
}

impl GenreField {
    fn into_tags(self) -> Vec<String> {
        match self {
            GenreField::Joined(s) => s.split_whitespace().map(str::to_string).collect(),
            GenreField::List(list) => list
                .into_iter()
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .collect(),
        }
    }
}

// DTO used by views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl From<BookRecord> for Book {
    fn from(record: BookRecord) -> Self {
        let description = record
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty() && d != NO_DESCRIPTION);

        Self {
            id: record.book_id,
            title: record.title,
            author: record.author.unwrap_or_default(),
            genres: record.genres.map(GenreField::into_tags).unwrap_or_default(),
            description,
            avg_rating: record.avg_rating,
            score: record.score,
        }
    }
}

impl Book {
    /// First letter of the title, used as a cover placeholder
    pub fn initial(&self) -> char {
        self.title.chars().next().unwrap_or('?')
    }

    pub fn card_tags(&self) -> &[String] {
        let end = self.genres.len().min(CARD_TAG_LIMIT);
        &self.genres[..end]
    }

    /// Relevance score as a whole percentage ("87% Match")
    pub fn match_percent(&self) -> Option<u32> {
        self.score
            .map(|s| (s.clamp(0.0, 1.0) * 100.0).round() as u32)
    }
}
