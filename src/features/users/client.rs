use super::types::User;
use crate::{error::Result, net::ApiClient};
use tracing::instrument;

#[derive(Clone, Debug)]
pub struct UserClient {
    api: ApiClient,
}

impl UserClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    /// Returns transport, HTTP status or decoding errors.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: u64) -> Result<User> {
        self.api.get_json(&format!("api/user/{id}")).await
    }

    /// # Errors
    /// Returns transport or HTTP status errors.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.api.delete(&format!("api/user/{id}")).await
    }
}
