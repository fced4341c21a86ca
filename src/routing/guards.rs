//! Route admission checks. Guards are pure readers of the session store: they
//! never log in or out, and they are UX-only since real access control lives
//! on the API.

use super::Route;
use crate::session::SessionStore;

/// Outcome of a guard check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Admit,
    Redirect(Route),
}

impl GuardDecision {
    #[must_use]
    pub fn is_admit(&self) -> bool {
        matches!(self, Self::Admit)
    }

    #[must_use]
    pub fn redirect_target(&self) -> Option<&Route> {
        match self {
            Self::Admit => None,
            Self::Redirect(route) => Some(route),
        }
    }
}

/// Performs navigation on behalf of a guard.
pub trait Navigator {
    fn navigate(&self, route: &Route);
}

pub trait RouteGuard {
    fn check(&self) -> GuardDecision;

    /// Router-hook form of `check`: returns whether entry proceeds and, when it
    /// does not, issues exactly one navigation to the redirect target first.
    fn can_activate(&self, navigator: &dyn Navigator) -> bool {
        match self.check() {
            GuardDecision::Admit => true,
            GuardDecision::Redirect(route) => {
                navigator.navigate(&route);
                false
            }
        }
    }
}

/// Admits authenticated users; sends everyone else to the login page.
#[derive(Clone, Debug)]
pub struct AuthGuard {
    store: SessionStore,
}

impl AuthGuard {
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }
}

impl RouteGuard for AuthGuard {
    fn check(&self) -> GuardDecision {
        if self.store.is_authenticated() {
            GuardDecision::Admit
        } else {
            GuardDecision::Redirect(Route::Login)
        }
    }
}

/// Keeps signed-in users off the public-only pages (login, register).
#[derive(Clone, Debug)]
pub struct UnauthGuard {
    store: SessionStore,
}

impl UnauthGuard {
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }
}

impl RouteGuard for UnauthGuard {
    fn check(&self) -> GuardDecision {
        if self.store.is_authenticated() {
            GuardDecision::Redirect(Route::Sessions)
        } else {
            GuardDecision::Admit
        }
    }
}

/// Session create/update pages: anonymous users go to login, non-admins back
/// to the session list.
#[derive(Clone, Debug)]
pub struct AdminGuard {
    store: SessionStore,
}

impl AdminGuard {
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }
}

impl RouteGuard for AdminGuard {
    fn check(&self) -> GuardDecision {
        match self.store.current_identity() {
            None => GuardDecision::Redirect(Route::Login),
            Some(identity) if !identity.is_admin => GuardDecision::Redirect(Route::Sessions),
            Some(_) => GuardDecision::Admit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionIdentity;
    use secrecy::SecretString;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingNavigator {
        calls: RefCell<Vec<Route>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: &Route) {
            self.calls.borrow_mut().push(route.clone());
        }
    }

    impl RecordingNavigator {
        fn calls(&self) -> Vec<Route> {
            self.calls.borrow().clone()
        }

        fn clear(&self) {
            self.calls.borrow_mut().clear();
        }
    }

    fn identity(admin: bool) -> SessionIdentity {
        SessionIdentity {
            token: SecretString::from("t"),
            token_type: "Bearer".to_string(),
            user_id: 7,
            username: "yoga@studio.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            is_admin: admin,
        }
    }

    #[test]
    fn auth_guard_admits_logged_in_user_without_navigation() {
        let store = SessionStore::new();
        store.log_in(identity(false));
        let navigator = RecordingNavigator::default();

        assert!(AuthGuard::new(store).can_activate(&navigator));
        assert!(navigator.calls().is_empty());
    }

    #[test]
    fn auth_guard_redirects_anonymous_user_to_login_once() {
        let store = SessionStore::new();
        let navigator = RecordingNavigator::default();

        assert!(!AuthGuard::new(store).can_activate(&navigator));
        assert_eq!(navigator.calls(), vec![Route::Login]);
    }

    #[test]
    fn auth_guard_redirects_on_every_denied_call() {
        let guard = AuthGuard::new(SessionStore::new());
        let navigator = RecordingNavigator::default();

        for _ in 0..3 {
            assert!(!guard.can_activate(&navigator));
        }
        assert_eq!(navigator.calls(), vec![Route::Login; 3]);
    }

    #[test]
    fn auth_guard_follows_state_changes() {
        let store = SessionStore::new();
        let guard = AuthGuard::new(store.clone());
        let navigator = RecordingNavigator::default();

        assert!(!guard.can_activate(&navigator));
        assert_eq!(navigator.calls(), vec![Route::Login]);

        navigator.clear();
        store.log_in(identity(false));
        assert!(guard.can_activate(&navigator));
        assert!(navigator.calls().is_empty());
    }

    #[test]
    fn unauth_guard_admits_anonymous_user() {
        let navigator = RecordingNavigator::default();
        assert!(UnauthGuard::new(SessionStore::new()).can_activate(&navigator));
        assert!(navigator.calls().is_empty());
    }

    #[test]
    fn unauth_guard_redirects_logged_in_user_to_sessions() {
        let store = SessionStore::new();
        store.log_in(identity(false));
        let navigator = RecordingNavigator::default();

        assert!(!UnauthGuard::new(store).can_activate(&navigator));
        assert_eq!(navigator.calls(), vec![Route::Sessions]);
    }

    #[test]
    fn guards_are_complements_for_the_same_state() {
        let store = SessionStore::new();
        let auth = AuthGuard::new(store.clone());
        let unauth = UnauthGuard::new(store.clone());

        for logged_in in [false, true, false] {
            if logged_in {
                store.log_in(identity(false));
            } else {
                store.log_out();
            }
            assert_eq!(auth.check().is_admit(), !unauth.check().is_admit());
        }
    }

    #[test]
    fn admin_guard_checks_admin_flag() {
        let store = SessionStore::new();
        let guard = AdminGuard::new(store.clone());
        assert_eq!(guard.check(), GuardDecision::Redirect(Route::Login));

        store.log_in(identity(false));
        assert_eq!(guard.check(), GuardDecision::Redirect(Route::Sessions));

        store.log_in(identity(true));
        assert_eq!(guard.check(), GuardDecision::Admit);
    }

    #[test]
    fn checks_never_change_the_store() {
        let store = SessionStore::new();
        let mut sub = store.observe_authenticated();
        let navigator = RecordingNavigator::default();

        let _ = AuthGuard::new(store.clone()).can_activate(&navigator);
        let _ = UnauthGuard::new(store.clone()).can_activate(&navigator);
        let _ = AdminGuard::new(store.clone()).check();

        assert_eq!(sub.drain(), vec![false]);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn redirect_target_exposes_route() {
        assert_eq!(GuardDecision::Admit.redirect_target(), None);
        assert_eq!(
            GuardDecision::Redirect(Route::Login).redirect_target(),
            Some(&Route::Login)
        );
    }
}
