pub mod auth;
pub mod sessions;
pub mod teachers;
pub mod timestamps;
pub mod users;
pub mod validation;
