use crate::domain::AuthError;
use crate::models::{FederatedCredential, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

/// What the shell should ask the identity adapter to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginRequest {
    Password {
        mode: AuthMode,
        email: String,
        password: String,
    },
    Federated(FederatedCredential),
    Demo,
}

/// Login form state
///
/// A failed attempt keeps email and password so the user can correct them.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub mode: AuthMode,
    pub error: Option<String>,
    pub pending: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
    }

    pub fn submit_credentials(&mut self) -> Option<LoginRequest> {
        self.error = None;

        if self.email.trim().is_empty() || self.password.is_empty() {
            self.error = Some("Email and password are required.".to_string());
            return None;
        }

        self.begin(LoginRequest::Password {
            mode: self.mode,
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    pub fn submit_federated(&mut self, credential: FederatedCredential) -> Option<LoginRequest> {
        self.begin(LoginRequest::Federated(credential))
    }

    pub fn submit_demo(&mut self) -> Option<LoginRequest> {
        self.begin(LoginRequest::Demo)
    }

    fn begin(&mut self, request: LoginRequest) -> Option<LoginRequest> {
        if self.pending {
            tracing::debug!("Sign-in already in flight; ignoring submit");
            return None;
        }
        self.pending = true;
        Some(request)
    }

    /// Apply the adapter's answer. Returns the session on success.
    pub fn finish(&mut self, result: Result<Session, AuthError>) -> Option<Session> {
        self.pending = false;
        match result {
            Ok(session) => {
                self.error = None;
                Some(session)
            }
            Err(e) => {
                tracing::warn!("Sign-in failed: {}", e);
                self.error = Some(e.message().to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_keeps_input_and_shows_banner() {
        let mut form = LoginForm::new();
        form.email = "reader@example.com".to_string();
        form.password = "hunter22".to_string();

        let request = form.submit_credentials().expect("request");
        assert!(matches!(request, LoginRequest::Password { mode: AuthMode::SignIn, .. }));
        assert!(form.pending);

        let session = form.finish(Err(AuthError::InvalidCredentials(
            "Invalid email or password.".to_string(),
        )));
        assert!(session.is_none());
        assert_eq!(form.error.as_deref(), Some("Invalid email or password."));
        assert_eq!(form.email, "reader@example.com");
        assert_eq!(form.password, "hunter22");
        assert!(!form.pending);

        // Resubmitting clears the banner
        form.toggle_mode();
        let request = form.submit_credentials().expect("request");
        assert!(matches!(request, LoginRequest::Password { mode: AuthMode::SignUp, .. }));
        assert!(form.error.is_none());
    }

    #[test]
    fn test_blank_credentials_are_not_submitted() {
        let mut form = LoginForm::new();
        assert!(form.submit_credentials().is_none());
        assert!(form.error.is_some());
        assert!(!form.pending);
    }

    #[test]
    fn test_single_attempt_in_flight() {
        let mut form = LoginForm::new();
        assert_eq!(form.submit_demo(), Some(LoginRequest::Demo));
        assert_eq!(form.submit_demo(), None);
    }
}
