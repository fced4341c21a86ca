//! The signed-in user's profile and account deletion.

pub(crate) mod client;
pub(crate) mod types;

pub use client::UserClient;
pub use types::User;
