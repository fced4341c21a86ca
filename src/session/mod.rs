//! Authenticated-session state: the identity issued at login and the store that
//! holds it for the lifetime of the process. Nothing here performs I/O or is
//! persisted; the token must never be logged.

mod identity;
mod store;

pub use identity::{SessionIdentity, DEFAULT_TOKEN_TYPE};
pub use store::{SessionStore, Subscription};
