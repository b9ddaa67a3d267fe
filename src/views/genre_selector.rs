/// Genres offered during onboarding
pub const GENRES: [&str; 15] = [
    "Fiction",
    "Non-Fiction",
    "Mystery",
    "Sci-Fi",
    "Fantasy",
    "Romance",
    "Thriller",
    "Biography",
    "History",
    "Self-Help",
    "Business",
    "Young Adult",
    "Classics",
    "Horror",
    "Poetry",
];

/// Multi-select over [`GENRES`], kept in the order the user picked them
#[derive(Debug, Clone, Default)]
pub struct GenreSelector {
    selected: Vec<String>,
}

impl GenreSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a genre. Matching is case-insensitive; unknown labels are ignored.
    pub fn toggle(&mut self, genre: &str) -> bool {
        let Some(canonical) = GENRES
            .iter()
            .find(|g| g.eq_ignore_ascii_case(genre.trim()))
        else {
            tracing::debug!("Ignoring unknown genre: {}", genre);
            return false;
        };

        if let Some(pos) = self.selected.iter().position(|g| g == canonical) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(canonical.to_string());
            true
        }
    }

    pub fn is_selected(&self, genre: &str) -> bool {
        self.selected.iter().any(|g| g.eq_ignore_ascii_case(genre))
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn can_continue(&self) -> bool {
        !self.selected.is_empty()
    }

    /// The selection to hand to the session, or `None` while nothing is picked
    pub fn finish(&self) -> Option<Vec<String>> {
        self.can_continue().then(|| self.selected.clone())
    }
}
