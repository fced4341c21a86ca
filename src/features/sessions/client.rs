//! Client for `/api/session`: listing, detail, admin CRUD and participation.

use super::types::{SessionForm, YogaSession};
use crate::{error::Result, net::ApiClient};
use tracing::instrument;

const PATH: &str = "api/session";

#[derive(Clone, Debug)]
pub struct SessionClient {
    api: ApiClient,
}

impl SessionClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    /// Returns transport, HTTP status or decoding errors.
    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<YogaSession>> {
        self.api.get_json(PATH).await
    }

    /// # Errors
    /// Returns `Error::Http` with status 404 when the session does not exist.
    #[instrument(skip(self))]
    pub async fn detail(&self, id: u64) -> Result<YogaSession> {
        self.api.get_json(&format!("{PATH}/{id}")).await
    }

    /// # Errors
    /// Returns transport, HTTP status or decoding errors.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create(&self, form: &SessionForm) -> Result<YogaSession> {
        self.api.post_json(PATH, form).await
    }

    /// # Errors
    /// Returns transport, HTTP status or decoding errors.
    #[instrument(skip(self, form))]
    pub async fn update(&self, id: u64, form: &SessionForm) -> Result<YogaSession> {
        self.api.put_json(&format!("{PATH}/{id}"), form).await
    }

    /// # Errors
    /// Returns transport or HTTP status errors.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.api.delete(&format!("{PATH}/{id}")).await
    }

    /// # Errors
    /// Returns transport or HTTP status errors.
    #[instrument(skip(self))]
    pub async fn participate(&self, id: u64, user_id: u64) -> Result<()> {
        self.api
            .post_empty(&format!("{PATH}/{id}/participate/{user_id}"))
            .await
    }

    /// # Errors
    /// Returns transport or HTTP status errors.
    #[instrument(skip(self))]
    pub async fn unparticipate(&self, id: u64, user_id: u64) -> Result<()> {
        self.api
            .delete(&format!("{PATH}/{id}/participate/{user_id}"))
            .await
    }
}
