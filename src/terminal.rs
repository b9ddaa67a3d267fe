//! Line-oriented terminal front end
//!
//! Parses typed commands into [`UserAction`]s and renders the mounted view as
//! plain text.

use std::fmt::Write;

use crate::app::{App, MountedView, UserAction};
use crate::models::{FederatedCredential, FeedbackAction};
use crate::views::genre_selector::GENRES;
use crate::views::swipe_deck::SWIPE_LIMIT;
use crate::views::{AuthMode, DeckState};

pub const HELP: &str = "\
Commands:
  demo                          sign in as the demo user
  login <email> <password>      sign in with email and password
  signup <email> <password>     create an account
  federated <provider> <token>  sign in with a provider id token (e.g. google.com)
  genre <name>                  toggle a genre during onboarding
  continue                      finish onboarding
  like | pass                   swipe the current card
  refresh                       reload an empty deck
  rate <book-id> like|pass      rate a curated pick
  go <path>                     navigate (/, /recommendations, /history, ...)
  logout                        end the session
  help                          show this text
  quit                          exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Credentials {
        mode: AuthMode,
        email: String,
        password: String,
    },
    Action(UserAction),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("Type `help` for commands.".to_string());
    };
    let rest: Vec<&str> = words.collect();

    let command = match (head.to_lowercase().as_str(), rest.as_slice()) {
        ("demo", []) => Command::Action(UserAction::SignInDemo),
        ("login", [email, password]) => Command::Credentials {
            mode: AuthMode::SignIn,
            email: email.to_string(),
            password: password.to_string(),
        },
        ("signup", [email, password]) => Command::Credentials {
            mode: AuthMode::SignUp,
            email: email.to_string(),
            password: password.to_string(),
        },
        ("federated", [provider, token]) => {
            Command::Action(UserAction::SignInFederated(FederatedCredential {
                provider_id: provider.to_string(),
                id_token: token.to_string(),
            }))
        }
        // Genre names may contain spaces ("Young Adult")
        ("genre", words) if !words.is_empty() => {
            Command::Action(UserAction::ToggleGenre(words.join(" ")))
        }
        ("continue", []) => Command::Action(UserAction::ContinueOnboarding),
        ("like", []) => Command::Action(UserAction::Swipe(FeedbackAction::Like)),
        ("pass", []) => Command::Action(UserAction::Swipe(FeedbackAction::Pass)),
        ("refresh", []) => Command::Action(UserAction::RefreshDeck),
        ("rate", [book_id, action]) => {
            let book_id = book_id
                .parse()
                .map_err(|_| format!("Not a book id: {}", book_id))?;
            let action = action.parse::<FeedbackAction>()?;
            Command::Action(UserAction::Rate { book_id, action })
        }
        ("go", [path]) => Command::Action(UserAction::Navigate(path.to_string())),
        ("logout", []) => Command::Action(UserAction::SignOut),
        ("help", _) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => return Err(format!("Unrecognised command: {}. Type `help`.", line.trim())),
    };

    Ok(command)
}

/// Turn a credentials command into the form edits plus submit
pub fn credential_actions(app: &App, mode: AuthMode, email: String, password: String) -> Vec<UserAction> {
    let mut actions = vec![UserAction::EditEmail(email), UserAction::EditPassword(password)];
    if let MountedView::Login(form) = app.view()
        && form.mode != mode
    {
        actions.push(UserAction::ToggleAuthMode);
    }
    actions.push(UserAction::SubmitCredentials);
    actions
}

pub fn render(app: &App) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "─── {} ───", app.path());

    if let Some(session) = app.context().session() {
        let _ = writeln!(out, "Signed in as {}", session.display_name);
    }

    match app.view() {
        MountedView::Login(form) => {
            let _ = writeln!(out, "Welcome to BookSwipe");
            let _ = writeln!(out, "Discover your next favorite read.");
            let mode = match form.mode {
                AuthMode::SignIn => "Sign In",
                AuthMode::SignUp => "Create Account",
            };
            let _ = writeln!(out, "Mode: {}", mode);
            if form.pending {
                let _ = writeln!(out, "Signing in...");
            }
            if let Some(error) = &form.error {
                let _ = writeln!(out, "! {}", error);
            }
            let _ = writeln!(out, "Use `login`, `signup`, `federated` or `demo`.");
        }
        MountedView::GenreSelector(selector) => {
            let _ = writeln!(out, "What do you like to read?");
            for genre in GENRES {
                let mark = if selector.is_selected(genre) { "x" } else { " " };
                let _ = writeln!(out, "  [{}] {}", mark, genre);
            }
            if selector.can_continue() {
                let _ = writeln!(out, "Type `continue` to start swiping.");
            } else {
                let _ = writeln!(out, "Pick at least one genre with `genre <name>`.");
            }
        }
        MountedView::SwipeDeck(deck) => match deck.state() {
            DeckState::Loading => {
                let _ = writeln!(out, "Loading books...");
            }
            DeckState::Empty => {
                let _ = writeln!(out, "No more books!");
                if deck.is_loading() {
                    let _ = writeln!(out, "Fetching more...");
                } else {
                    let _ = writeln!(out, "Type `refresh` to try again.");
                }
            }
            DeckState::Presenting { .. } => {
                if let Some(book) = deck.current() {
                    let _ = writeln!(out, "[{}]  {}", book.initial(), book.title);
                    let _ = writeln!(out, "     {}", book.author);
                    if !book.card_tags().is_empty() {
                        let _ = writeln!(out, "     #{}", book.card_tags().join(" #"));
                    }
                    if let Some(description) = &book.description {
                        let _ = writeln!(out, "     {}", description);
                    }
                }
                let _ = writeln!(
                    out,
                    "Swipe {}/{}: `like` or `pass`",
                    deck.swipe_count() + 1,
                    SWIPE_LIMIT
                );
            }
        },
        MountedView::Recommendations(curated) => {
            if curated.is_loading() {
                let _ = writeln!(out, "Loading your curated list...");
            } else {
                let _ = writeln!(out, "Your Curated Collection");
                let _ = writeln!(out, "Based on your recent swipes, we think you'll love these.");
                for book in curated.books() {
                    let score = book
                        .match_percent()
                        .map(|p| format!("{}% Match", p))
                        .unwrap_or_default();
                    let _ = writeln!(
                        out,
                        "  #{:<6} {} by {}  {}",
                        book.id, book.title, book.author, score
                    );
                }
                let _ = writeln!(out, "`rate <id> like|pass`, or `go /` to keep swiping.");
            }
        }
        MountedView::History(history) => {
            let _ = writeln!(out, "Your History");
            if history.is_loading() {
                let _ = writeln!(out, "Loading...");
            } else if history.entries().is_empty() {
                let _ = writeln!(out, "No history yet. Start swiping!");
            } else {
                for entry in history.entries() {
                    let _ = writeln!(out, "  Book #{:<8} {}", entry.book_id, entry.label());
                }
            }
        }
        MountedView::NotFound(path) => {
            let _ = writeln!(out, "Nothing at {}", path);
        }
    }

    out
}
