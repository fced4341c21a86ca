//! Route table for the studio app and guard-aware route resolution. The
//! resolver is deterministic: it evaluates the guard for the requested route
//! and, on denial, enters the redirect target directly instead of chasing
//! further redirects.

mod guards;

pub use guards::{AdminGuard, AuthGuard, GuardDecision, Navigator, RouteGuard, UnauthGuard};

use crate::session::SessionStore;
use std::fmt;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Sessions,
    SessionDetail(u64),
    SessionCreate,
    SessionUpdate(u64),
    Me,
    NotFound,
}

impl Route {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Sessions => "/sessions".to_string(),
            Self::SessionDetail(id) => format!("/sessions/detail/{id}"),
            Self::SessionCreate => "/sessions/create".to_string(),
            Self::SessionUpdate(id) => format!("/sessions/update/{id}"),
            Self::Me => "/me".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// Maps a path (query and fragment ignored) to its route; anything unknown
    /// is `NotFound`.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim()
            .trim_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["sessions"] => Self::Sessions,
            ["sessions", "create"] => Self::SessionCreate,
            ["sessions", "detail", id] => id.parse().map_or(Self::NotFound, Self::SessionDetail),
            ["sessions", "update", id] => id.parse().map_or(Self::NotFound, Self::SessionUpdate),
            ["me"] => Self::Me,
            _ => Self::NotFound,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Which guard protects a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protection {
    Public,
    Authenticated,
    AnonymousOnly,
    Admin,
}

impl Protection {
    #[must_use]
    pub fn of(route: &Route) -> Self {
        match route {
            Route::Home | Route::NotFound => Self::Public,
            Route::Login | Route::Register => Self::AnonymousOnly,
            Route::Sessions | Route::SessionDetail(_) | Route::Me => Self::Authenticated,
            Route::SessionCreate | Route::SessionUpdate(_) => Self::Admin,
        }
    }
}

/// Result of resolving a navigation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Enter(Route),
    Redirect { from: Route, to: Route },
}

impl Navigation {
    /// The route the user ends up on.
    #[must_use]
    pub fn destination(&self) -> &Route {
        match self {
            Self::Enter(route) | Self::Redirect { to: route, .. } => route,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Router {
    auth: AuthGuard,
    unauth: UnauthGuard,
    admin: AdminGuard,
}

impl Router {
    #[must_use]
    pub fn new(store: &SessionStore) -> Self {
        Self {
            auth: AuthGuard::new(store.clone()),
            unauth: UnauthGuard::new(store.clone()),
            admin: AdminGuard::new(store.clone()),
        }
    }

    #[must_use]
    pub fn check(&self, route: &Route) -> GuardDecision {
        match Protection::of(route) {
            Protection::Public => GuardDecision::Admit,
            Protection::Authenticated => self.auth.check(),
            Protection::AnonymousOnly => self.unauth.check(),
            Protection::Admin => self.admin.check(),
        }
    }

    #[must_use]
    pub fn resolve(&self, path: &str) -> Navigation {
        let route = Route::parse(path);
        match self.check(&route) {
            GuardDecision::Admit => Navigation::Enter(route),
            GuardDecision::Redirect(to) => {
                debug!(from = %route, to = %to, "navigation redirected");
                Navigation::Redirect { from: route, to }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionIdentity;
    use secrecy::SecretString;

    fn identity(admin: bool) -> SessionIdentity {
        SessionIdentity {
            token: SecretString::from("t"),
            token_type: "Bearer".to_string(),
            user_id: 1,
            username: "yoga@studio.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            is_admin: admin,
        }
    }

    #[test]
    fn parse_known_paths() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("register/"), Route::Register);
        assert_eq!(Route::parse("/sessions"), Route::Sessions);
        assert_eq!(Route::parse("/sessions/detail/4"), Route::SessionDetail(4));
        assert_eq!(Route::parse("/sessions/update/9?x=1"), Route::SessionUpdate(9));
        assert_eq!(Route::parse("/sessions/create"), Route::SessionCreate);
        assert_eq!(Route::parse("/me#top"), Route::Me);
    }

    #[test]
    fn parse_unknown_paths() {
        assert_eq!(Route::parse("/rentals"), Route::NotFound);
        assert_eq!(Route::parse("/sessions/detail/abc"), Route::NotFound);
        assert_eq!(Route::parse("/sessions/detail"), Route::NotFound);
    }

    #[test]
    fn path_round_trips_through_parse() {
        let routes = [
            Route::Home,
            Route::Login,
            Route::Register,
            Route::Sessions,
            Route::SessionDetail(3),
            Route::SessionCreate,
            Route::SessionUpdate(3),
            Route::Me,
            Route::NotFound,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn anonymous_user_is_sent_to_login() {
        let store = SessionStore::new();
        let router = Router::new(&store);

        assert_eq!(
            router.resolve("/sessions"),
            Navigation::Redirect {
                from: Route::Sessions,
                to: Route::Login
            }
        );
        assert_eq!(router.resolve("/login"), Navigation::Enter(Route::Login));
        assert_eq!(router.resolve("/"), Navigation::Enter(Route::Home));
        assert_eq!(
            router.resolve("/sessions/create").destination(),
            &Route::Login
        );
    }

    #[test]
    fn logged_in_user_skips_public_only_pages() {
        let store = SessionStore::new();
        store.log_in(identity(false));
        let router = Router::new(&store);

        assert_eq!(router.resolve("/register").destination(), &Route::Sessions);
        assert_eq!(router.resolve("/me"), Navigation::Enter(Route::Me));
        assert_eq!(
            router.resolve("/sessions/update/2").destination(),
            &Route::Sessions
        );
    }

    #[test]
    fn admin_reaches_session_forms() {
        let store = SessionStore::new();
        store.log_in(identity(true));
        let router = Router::new(&store);

        assert_eq!(
            router.resolve("/sessions/update/2"),
            Navigation::Enter(Route::SessionUpdate(2))
        );
        assert_eq!(
            router.resolve("/sessions/create"),
            Navigation::Enter(Route::SessionCreate)
        );
    }

    #[test]
    fn unknown_paths_are_public() {
        let router = Router::new(&SessionStore::new());
        assert_eq!(router.resolve("/nope"), Navigation::Enter(Route::NotFound));
    }
}
