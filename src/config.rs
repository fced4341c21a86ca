//! Client configuration for the studio API. Values come from the CLI (or its
//! environment fallbacks) and are never secret; credentials are passed
//! separately.

use crate::error::{Error, Result};
use std::time::Duration;
use url::Url;

/// Default request timeout applied to every API call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_base_url: Url,
    pub timeout: Duration,
    /// Clear the session store when a request that carried a bearer token is
    /// answered with 401.
    pub logout_on_unauthorized: bool,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL)
                .unwrap_or_else(|_| unreachable!("default API base URL is valid")),
            timeout: DEFAULT_TIMEOUT,
            logout_on_unauthorized: false,
            user_agent: crate::APP_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Builds a config for the given API base URL with default settings.
    ///
    /// # Errors
    /// Returns `Error::Config` if the URL cannot be parsed or is not http(s).
    pub fn new(api_base_url: &str) -> Result<Self> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url)?,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_logout_on_unauthorized(mut self, enabled: bool) -> Self {
        self.logout_on_unauthorized = enabled;
        self
    }

    /// Resolves an API path such as `api/session/1` against the base URL.
    ///
    /// # Errors
    /// Returns `Error::Config` if the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_base_url
            .join(path.trim().trim_start_matches('/'))
            .map_err(|err| Error::Config(format!("invalid endpoint {path}: {err}")))
    }
}

/// Parses the base URL and guarantees a trailing slash so relative API paths
/// join beneath it instead of replacing its last segment.
///
/// # Errors
/// Returns `Error::Config` for empty, unparsable or non-http(s) URLs.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::Config("API base URL is not configured.".to_string()));
    }

    let mut url = Url::parse(trimmed)
        .map_err(|err| Error::Config(format!("invalid API base URL {trimmed}: {err}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(Error::Config(format!(
                "unsupported API base URL scheme: {scheme}"
            )))
        }
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
