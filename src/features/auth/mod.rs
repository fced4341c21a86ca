//! Login and sign-up against `/api/auth`.

pub(crate) mod client;
pub(crate) mod types;

pub use client::AuthClient;
pub use types::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
