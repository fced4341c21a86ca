//! Yoga sessions: the listing every signed-in user sees, the detail page with
//! participation, and the admin-only create/update/delete operations.

pub(crate) mod client;
pub(crate) mod types;

pub use client::SessionClient;
pub use types::{SessionForm, YogaSession};
