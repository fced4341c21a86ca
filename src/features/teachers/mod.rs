pub(crate) mod client;
pub(crate) mod types;

pub use client::TeacherClient;
pub use types::Teacher;
