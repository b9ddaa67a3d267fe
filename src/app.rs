//! Application shell
//!
//! Owns the session context, the mounted view and the feedback outbox. User
//! actions and network completions are processed one at a time. Every network
//! call a view needs runs in that view's task scope; mounting another view
//! drops the scope, which aborts whatever was still in flight.

use tokio::task::JoinSet;

use crate::domain::{AuthError, NetworkError};
use crate::infrastructure::AppServices;
use crate::models::{Book, FederatedCredential, FeedbackAction, FeedbackEvent, HistoryEntry, Session};
use crate::sync::outbox::{FeedbackOutbox, OutboxPolicy};
use crate::views::curated::CURATED_COUNT;
use crate::views::navigator::{self, Resolution, Route, ViewKind};
use crate::views::swipe_deck::{DeckFetch, LoadKind};
use crate::views::{
    AuthMode, CuratedCollection, DeckState, GenreSelector, HistoryList, LoginForm, LoginRequest,
    SessionContext, SwipeDeck, SwipeOutcome,
};

/// Redirect hops followed before giving up on a path
const MAX_REDIRECTS: usize = 4;

#[derive(Debug)]
pub enum MountedView {
    Login(LoginForm),
    GenreSelector(GenreSelector),
    SwipeDeck(SwipeDeck),
    Recommendations(CuratedCollection),
    History(HistoryList),
    NotFound(String),
}

/// Completion of a task started by the mounted view
#[derive(Debug)]
pub enum ViewMessage {
    SignedIn(Result<Session, AuthError>),
    DeckFetched(Result<Vec<Book>, NetworkError>),
    CuratedFetched(Result<Vec<Book>, NetworkError>),
    HistoryFetched(Result<Vec<HistoryEntry>, NetworkError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    EditEmail(String),
    EditPassword(String),
    ToggleAuthMode,
    SubmitCredentials,
    SignInFederated(FederatedCredential),
    SignInDemo,
    ToggleGenre(String),
    ContinueOnboarding,
    Swipe(FeedbackAction),
    RefreshDeck,
    Rate { book_id: i64, action: FeedbackAction },
    Navigate(String),
    SignOut,
}

// Side effects decided while a view is borrowed, run afterwards in order
enum Effect {
    SignIn(LoginRequest),
    Establish(Session),
    Onboard(Vec<String>),
    Feedback(FeedbackEvent),
    FetchDeck(DeckFetch),
    Navigate(Route),
}

pub struct App {
    services: AppServices,
    context: SessionContext,
    outbox: FeedbackOutbox,
    path: String,
    view: MountedView,
    scope: JoinSet<ViewMessage>,
}

impl App {
    /// Create the shell with an empty session. Must be called inside a tokio runtime.
    pub fn new(services: AppServices, policy: OutboxPolicy) -> Self {
        let outbox = FeedbackOutbox::spawn(services.feedback.clone(), policy);

        Self {
            services,
            context: SessionContext::new(),
            outbox,
            path: Route::Login.path().to_string(),
            view: MountedView::Login(LoginForm::new()),
            scope: JoinSet::new(),
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn view(&self) -> &MountedView {
        &self.view
    }

    /// Path of the mounted view after redirects
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn location(&self) -> Option<Route> {
        Route::parse(&self.path).filter(|_| !matches!(self.view, MountedView::NotFound(_)))
    }

    pub fn outbox(&self) -> &FeedbackOutbox {
        &self.outbox
    }

    /// True while the mounted view still has tasks in flight
    pub fn has_pending(&self) -> bool {
        !self.scope.is_empty()
    }

    pub fn navigate(&mut self, path: &str) {
        let mut target = path.to_string();

        for _ in 0..MAX_REDIRECTS {
            match navigator::resolve(self.context.gate(), &target) {
                Resolution::Redirect(route) => {
                    tracing::debug!("Redirect {} -> {}", target, route.path());
                    target = route.path().to_string();
                }
                Resolution::Mount(kind) => {
                    if let Some(route) = Route::parse(&target) {
                        self.mount(route, kind);
                        return;
                    }
                    break;
                }
                Resolution::NotFound => break,
            }
        }

        tracing::warn!("No view for {}", path);
        self.scope = JoinSet::new();
        self.path = target.clone();
        self.view = MountedView::NotFound(target);
    }

    fn mount(&mut self, route: Route, kind: ViewKind) {
        // Dropping the old scope aborts the previous view's requests
        self.scope = JoinSet::new();

        let user_id = self.context.user_id().map(str::to_string);
        let view = match (kind, user_id) {
            (ViewKind::Login, _) => MountedView::Login(LoginForm::new()),
            (ViewKind::GenreSelector, Some(_)) => MountedView::GenreSelector(GenreSelector::new()),
            (ViewKind::SwipeDeck, Some(user_id)) => {
                let mut deck = SwipeDeck::new(user_id, self.context.genres().to_vec());
                let fetch = deck.begin_load(LoadKind::Reload);
                self.spawn_deck_fetch(fetch);
                MountedView::SwipeDeck(deck)
            }
            (ViewKind::Recommendations, Some(user_id)) => {
                self.spawn_curated_fetch(user_id.clone());
                MountedView::Recommendations(CuratedCollection::new(user_id))
            }
            (ViewKind::History, Some(user_id)) => {
                self.spawn_history_fetch(user_id.clone());
                MountedView::History(HistoryList::new(user_id))
            }
            (_, None) => {
                tracing::error!("{:?} needs a session; showing login", kind);
                self.path = Route::Login.path().to_string();
                self.view = MountedView::Login(LoginForm::new());
                return;
            }
        };

        tracing::info!("Mounted {:?} at {}", kind, route.path());
        self.path = route.path().to_string();
        self.view = view;
    }

    pub fn dispatch(&mut self, action: UserAction) {
        match action {
            UserAction::Navigate(path) => return self.navigate(&path),
            UserAction::SignOut => {
                self.context.teardown();
                return self.navigate(Route::Login.path());
            }
            _ => {}
        }

        let effects = match (&mut self.view, action) {
            (MountedView::Login(form), UserAction::EditEmail(email)) => {
                form.email = email;
                vec![]
            }
            (MountedView::Login(form), UserAction::EditPassword(password)) => {
                form.password = password;
                vec![]
            }
            (MountedView::Login(form), UserAction::ToggleAuthMode) => {
                form.toggle_mode();
                vec![]
            }
            (MountedView::Login(form), UserAction::SubmitCredentials) => {
                form.submit_credentials().map(Effect::SignIn).into_iter().collect()
            }
            (MountedView::Login(form), UserAction::SignInFederated(credential)) => form
                .submit_federated(credential)
                .map(Effect::SignIn)
                .into_iter()
                .collect(),
            (MountedView::Login(form), UserAction::SignInDemo) => {
                form.submit_demo().map(Effect::SignIn).into_iter().collect()
            }
            (MountedView::GenreSelector(selector), UserAction::ToggleGenre(genre)) => {
                selector.toggle(&genre);
                vec![]
            }
            (MountedView::GenreSelector(selector), UserAction::ContinueOnboarding) => {
                match selector.finish() {
                    Some(genres) => vec![Effect::Onboard(genres), Effect::Navigate(Route::Deck)],
                    None => vec![],
                }
            }
            (MountedView::SwipeDeck(deck), UserAction::Swipe(action)) => match deck.swipe(action) {
                SwipeOutcome::Ignored => vec![],
                // Feedback is queued before any prefetch starts
                SwipeOutcome::Advanced { event, prefetch } => {
                    let mut effects = vec![Effect::Feedback(event)];
                    if prefetch {
                        effects.push(Effect::FetchDeck(deck.begin_load(LoadKind::Prefetch)));
                    }
                    effects
                }
                SwipeOutcome::SessionComplete { event } => {
                    vec![Effect::Feedback(event), Effect::Navigate(Route::Recommendations)]
                }
            },
            (MountedView::SwipeDeck(deck), UserAction::RefreshDeck) => {
                if deck.state() == DeckState::Empty && !deck.is_loading() {
                    vec![Effect::FetchDeck(deck.begin_load(LoadKind::Reload))]
                } else {
                    vec![]
                }
            }
            (MountedView::Recommendations(curated), UserAction::Rate { book_id, action }) => {
                curated.rate(book_id, action).map(Effect::Feedback).into_iter().collect()
            }
            (_, action) => {
                tracing::debug!("Ignoring {:?} on {}", action, self.path);
                vec![]
            }
        };

        self.run(effects);
    }

    /// Wait for the next completion from the mounted view's tasks
    pub async fn next_message(&mut self) -> Option<ViewMessage> {
        while let Some(joined) = self.scope.join_next().await {
            match joined {
                Ok(message) => return Some(message),
                Err(e) if e.is_cancelled() => continue,
                Err(e) => tracing::error!("View task failed: {}", e),
            }
        }
        None
    }

    pub fn apply(&mut self, message: ViewMessage) {
        let effects = match (&mut self.view, message) {
            (MountedView::Login(form), ViewMessage::SignedIn(result)) => match form.finish(result) {
                Some(session) => vec![Effect::Establish(session), Effect::Navigate(Route::Deck)],
                None => vec![],
            },
            (MountedView::SwipeDeck(deck), ViewMessage::DeckFetched(result)) => {
                deck.apply_fetch(result);
                vec![]
            }
            (MountedView::Recommendations(curated), ViewMessage::CuratedFetched(result)) => {
                curated.apply_fetch(result);
                vec![]
            }
            (MountedView::History(history), ViewMessage::HistoryFetched(result)) => {
                history.apply_fetch(result);
                vec![]
            }
            (_, message) => {
                tracing::debug!("Dropping {:?} for {}", message, self.path);
                vec![]
            }
        };

        self.run(effects);
    }

    /// Apply completions until the mounted view has nothing in flight
    pub async fn settle(&mut self) {
        while let Some(message) = self.next_message().await {
            self.apply(message);
        }
    }

    /// Abort view work, close the session and flush pending feedback
    pub async fn shutdown(self) {
        let App {
            mut context,
            outbox,
            scope,
            ..
        } = self;

        drop(scope);
        context.teardown();
        outbox.shutdown().await;
    }

    fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SignIn(request) => self.spawn_sign_in(request),
                Effect::Establish(session) => self.context.establish(session),
                Effect::Onboard(genres) => self.context.complete_onboarding(genres),
                Effect::Feedback(event) => {
                    self.outbox.enqueue(event);
                }
                Effect::FetchDeck(fetch) => self.spawn_deck_fetch(fetch),
                Effect::Navigate(route) => self.navigate(route.path()),
            }
        }
    }

    fn spawn_sign_in(&mut self, request: LoginRequest) {
        let identity = self.services.identity.clone();
        self.scope.spawn(async move {
            let result = match request {
                LoginRequest::Password {
                    mode: AuthMode::SignIn,
                    email,
                    password,
                } => identity.sign_in_with_password(&email, &password).await,
                LoginRequest::Password {
                    mode: AuthMode::SignUp,
                    email,
                    password,
                } => identity.sign_up_with_password(&email, &password).await,
                LoginRequest::Federated(credential) => {
                    identity.sign_in_with_federated_provider(&credential).await
                }
                LoginRequest::Demo => identity.sign_in_as_demo_user().await,
            };
            ViewMessage::SignedIn(result)
        });
    }

    fn spawn_deck_fetch(&mut self, fetch: DeckFetch) {
        let repo = self.services.recommendations.clone();
        self.scope.spawn(async move {
            let result = repo
                .fetch_recommendations(&fetch.user_id, fetch.count, &fetch.genres)
                .await;
            ViewMessage::DeckFetched(result)
        });
    }

    fn spawn_curated_fetch(&mut self, user_id: String) {
        let repo = self.services.recommendations.clone();
        self.scope.spawn(async move {
            let result = repo.fetch_recommendations(&user_id, CURATED_COUNT, &[]).await;
            ViewMessage::CuratedFetched(result)
        });
    }

    fn spawn_history_fetch(&mut self, user_id: String) {
        let repo = self.services.history.clone();
        self.scope.spawn(async move {
            ViewMessage::HistoryFetched(repo.fetch_history(&user_id).await)
        });
    }
}
