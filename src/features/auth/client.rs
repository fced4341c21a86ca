use super::types::{LoginRequest, LoginResponse, RegisterRequest};
use crate::{error::Result, net::ApiClient, session::SessionIdentity};
use tracing::instrument;

#[derive(Clone, Debug)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchanges credentials for a session identity. The store is not touched;
    /// callers decide when to publish the identity.
    ///
    /// # Errors
    /// Returns `Error::Http` with status 401 on bad credentials, or transport and
    /// decoding errors.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<SessionIdentity> {
        let response: LoginResponse = self.api.post_json("api/auth/login", request).await?;
        Ok(SessionIdentity::from(response))
    }

    /// # Errors
    /// Returns `Error::Http` with status 400 when the backend rejects the form.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        self.api.post_json_empty("api/auth/register", request).await
    }
}
