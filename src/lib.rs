//! # Yoga Studio (session-booking client)
//!
//! `yogastudio` talks to the yoga studio REST backend on behalf of a single
//! signed-in user. It owns the authenticated-session state for the running
//! process and keeps every consumer of that state consistent.
//!
//! ## Session state
//!
//! The [`SessionStore`] is either **anonymous** or **authenticated**. Identity and
//! the boolean flag change together, atomically, through `log_in`/`log_out`.
//! Subscribers receive the current flag first and then every change in call order.
//!
//! ## Guards and token injection
//!
//! Route guards read the store and return a tagged [`routing::GuardDecision`] so a
//! router can act on it. The [`net::BearerTokenLayer`] attaches
//! `Authorization: <type> <token>` to every outbound request while a user is
//! signed in and forwards requests untouched otherwise. Access control still
//! lives on the API; guards only shape navigation.
//!
//! ## Flow overview
//!
//! 1. **Login:** [`Studio::login`] validates the form, posts `/api/auth/login` and
//!    pushes the returned identity into the store.
//! 2. **Browse:** session, teacher and user clients issue requests through the
//!    shared `ApiClient`, which carries the bearer token.
//! 3. **Logout / delete account:** the store is cleared and the caller is told to
//!    navigate home.

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod net;
pub mod routing;
pub mod session;
pub mod studio;

pub use config::ClientConfig;
pub use error::{Error, Result, ValidationErrors};
pub use session::{SessionIdentity, SessionStore, Subscription};
pub use studio::Studio;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
