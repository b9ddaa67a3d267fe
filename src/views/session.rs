//! Session context owned by the application root
//!
//! Holds the signed-in [`Session`] and the onboarding selection. The session
//! is only ever replaced as a whole; views read what they need at mount time.

use crate::models::Session;

use super::navigator::Gate;

#[derive(Debug, Default)]
pub struct SessionContext {
    session: Option<Session>,
    genres: Option<Vec<String>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly signed-in session.
    ///
    /// Onboarding survives only when the same user signs in again.
    pub fn establish(&mut self, session: Session) {
        let same_user = self
            .session
            .as_ref()
            .is_some_and(|s| s.user_id == session.user_id);
        if !same_user {
            self.genres = None;
        }

        tracing::info!("Session established for {}", session.display_name);
        self.session = Some(session);
    }

    pub fn complete_onboarding(&mut self, genres: Vec<String>) {
        tracing::info!("Onboarding complete: {:?}", genres);
        self.genres = Some(genres);
    }

    /// Drop the session and onboarding selection
    pub fn teardown(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!("Session closed for {}", session.display_name);
        }
        self.genres = None;
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user_id.as_str())
    }

    pub fn genres(&self) -> &[String] {
        self.genres.as_deref().unwrap_or_default()
    }

    pub fn gate(&self) -> Gate {
        Gate {
            authenticated: self.session.is_some(),
            onboarded: self.genres.is_some(),
        }
    }
}
