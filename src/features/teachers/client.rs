use super::types::Teacher;
use crate::{error::Result, net::ApiClient};
use tracing::instrument;

/// Read-only access to `/api/teacher`, used to fill the session form.
#[derive(Clone, Debug)]
pub struct TeacherClient {
    api: ApiClient,
}

impl TeacherClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    /// Returns transport, HTTP status or decoding errors.
    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<Teacher>> {
        self.api.get_json("api/teacher").await
    }

    /// # Errors
    /// Returns `Error::Http` with status 404 when the teacher does not exist.
    #[instrument(skip(self))]
    pub async fn detail(&self, id: u64) -> Result<Teacher> {
        self.api.get_json(&format!("api/teacher/{id}")).await
    }
}
