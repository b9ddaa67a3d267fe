//! Route table
//!
//! A pure function from (authenticated?, onboarded?, path) to the view that
//! should mount or the route to redirect to. Gated views never mount without
//! a session, so no view issues a backend call before sign-in.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Onboarding,
    Deck,
    Recommendations,
    History,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Login,
        Route::Onboarding,
        Route::Deck,
        Route::Recommendations,
        Route::History,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Onboarding => "/onboarding",
            Route::Deck => "/",
            Route::Recommendations => "/recommendations",
            Route::History => "/history",
        }
    }

    /// Match a path, ignoring any query string and a trailing slash
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default().trim();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Route::ALL.into_iter().find(|r| r.path() == path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    GenreSelector,
    SwipeDeck,
    Recommendations,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Mount(ViewKind),
    Redirect(Route),
    NotFound,
}

/// What the navigator needs to know about the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gate {
    pub authenticated: bool,
    pub onboarded: bool,
}

pub fn resolve(gate: Gate, path: &str) -> Resolution {
    let Some(route) = Route::parse(path) else {
        return Resolution::NotFound;
    };

    if route == Route::Login {
        return Resolution::Mount(ViewKind::Login);
    }
    if !gate.authenticated {
        return Resolution::Redirect(Route::Login);
    }

    match route {
        Route::Login => Resolution::Mount(ViewKind::Login),
        Route::Onboarding => Resolution::Mount(ViewKind::GenreSelector),
        Route::Deck if gate.onboarded => Resolution::Mount(ViewKind::SwipeDeck),
        Route::Deck => Resolution::Redirect(Route::Onboarding),
        Route::Recommendations => Resolution::Mount(ViewKind::Recommendations),
        Route::History => Resolution::Mount(ViewKind::History),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANON: Gate = Gate {
        authenticated: false,
        onboarded: false,
    };
    const NEW_USER: Gate = Gate {
        authenticated: true,
        onboarded: false,
    };
    const READY: Gate = Gate {
        authenticated: true,
        onboarded: true,
    };

    #[test]
    fn test_route_table() {
        use Resolution::{Mount, Redirect};

        let table = [
            ("/login", Mount(ViewKind::Login), Mount(ViewKind::Login), Mount(ViewKind::Login)),
            (
                "/onboarding",
                Redirect(Route::Login),
                Mount(ViewKind::GenreSelector),
                Mount(ViewKind::GenreSelector),
            ),
            (
                "/",
                Redirect(Route::Login),
                Redirect(Route::Onboarding),
                Mount(ViewKind::SwipeDeck),
            ),
            (
                "/recommendations",
                Redirect(Route::Login),
                Mount(ViewKind::Recommendations),
                Mount(ViewKind::Recommendations),
            ),
            (
                "/history",
                Redirect(Route::Login),
                Mount(ViewKind::History),
                Mount(ViewKind::History),
            ),
        ];

        for (path, anon, new_user, ready) in table {
            assert_eq!(resolve(ANON, path), anon, "unauthenticated {}", path);
            assert_eq!(resolve(NEW_USER, path), new_user, "not onboarded {}", path);
            assert_eq!(resolve(READY, path), ready, "onboarded {}", path);
        }
    }

    #[test]
    fn test_onboarded_flag_without_session_still_redirects() {
        let gate = Gate {
            authenticated: false,
            onboarded: true,
        };
        assert_eq!(resolve(gate, "/"), Resolution::Redirect(Route::Login));
    }

    #[test]
    fn test_path_normalisation() {
        assert_eq!(Route::parse("/history/"), Some(Route::History));
        assert_eq!(Route::parse("/recommendations?from=deck"), Some(Route::Recommendations));
        assert_eq!(Route::parse(""), Some(Route::Deck));
        assert_eq!(Route::parse("/settings"), None);
        assert_eq!(resolve(READY, "/settings"), Resolution::NotFound);
    }

    #[test]
    fn test_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::parse(route.path()), Some(route));
        }
    }
}
