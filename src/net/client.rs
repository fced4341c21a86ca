//! JSON helpers over the API service stack with consistent error handling.
//! Feature clients use these helpers to avoid duplicating request setup. The
//! stack is `User-Agent` → `Accept` → bearer token → transport; the helpers
//! themselves never touch tokens.

use super::{
    interceptor::BearerTokenLayer,
    transport::{HttpRequest, HttpResponse, ReqwestTransport},
};
use crate::{
    config::ClientConfig,
    error::{Error, Result},
    session::SessionStore,
};
use bytes::Bytes;
use http::{
    header::{ACCEPT, CONTENT_TYPE, USER_AGENT},
    HeaderValue, Method, Request, StatusCode,
};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Serialize};
use std::{fmt, sync::Arc};
use tower::{util::BoxCloneSyncService, Service, ServiceBuilder, ServiceExt};
use tower_http::set_header::SetRequestHeaderLayer;
use tracing::{debug, info_span, warn, Instrument};

/// Maximum number of error body characters surfaced to callers.
const MAX_ERROR_CHARS: usize = 200;

pub type HttpService = BoxCloneSyncService<HttpRequest, HttpResponse, Error>;

#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    store: SessionStore,
    service: HttpService,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_base_url", &self.config.api_base_url.as_str())
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Builds a client that talks to the configured backend over the network.
    ///
    /// # Errors
    /// Returns `Error::Config` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, store: SessionStore) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, store, transport))
    }

    /// Builds a client on top of any transport service.
    pub fn with_transport<S>(config: ClientConfig, store: SessionStore, transport: S) -> Self
    where
        S: Service<HttpRequest, Response = HttpResponse, Error = Error>
            + Clone
            + Send
            + Sync
            + 'static,
        S::Future: Send + 'static,
    {
        let user_agent = HeaderValue::from_str(&config.user_agent).unwrap_or_else(|_| {
            warn!(
                user_agent = %config.user_agent,
                "configured user agent is not a valid header value; using {}",
                crate::APP_USER_AGENT
            );
            HeaderValue::from_static(crate::APP_USER_AGENT)
        });

        let service = ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::if_not_present(USER_AGENT, user_agent))
            .layer(SetRequestHeaderLayer::if_not_present(
                ACCEPT,
                HeaderValue::from_static("application/json"),
            ))
            .layer(BearerTokenLayer::new(store.clone()))
            .service(transport);

        Self {
            config: Arc::new(config),
            store,
            service: BoxCloneSyncService::new(service),
        }
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches and decodes JSON.
    ///
    /// # Errors
    /// Returns transport, HTTP status or decoding errors.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, path, None).await?;
        handle_json_response(response)
    }

    /// Posts JSON and decodes the JSON response.
    ///
    /// # Errors
    /// Returns encoding, transport, HTTP status or decoding errors.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(Method::POST, path, Some(encode_body(body)?))
            .await?;
        handle_json_response(response)
    }

    /// Posts JSON and ignores the response body.
    ///
    /// # Errors
    /// Returns encoding, transport or HTTP status errors.
    pub async fn post_json_empty<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let response = self
            .send(Method::POST, path, Some(encode_body(body)?))
            .await?;
        handle_empty_response(response)
    }

    /// Puts JSON and decodes the JSON response.
    ///
    /// # Errors
    /// Returns encoding, transport, HTTP status or decoding errors.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(Method::PUT, path, Some(encode_body(body)?))
            .await?;
        handle_json_response(response)
    }

    /// Posts without a body, used for participation.
    ///
    /// # Errors
    /// Returns transport or HTTP status errors.
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        let response = self.send(Method::POST, path, None).await?;
        handle_empty_response(response)
    }

    /// # Errors
    /// Returns transport or HTTP status errors.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let response = self.send(Method::DELETE, path, None).await?;
        handle_empty_response(response)
    }

    async fn send(&self, method: Method, path: &str, body: Option<Bytes>) -> Result<HttpResponse> {
        let url = self.config.endpoint(path)?;

        let mut builder = Request::builder().method(method.clone()).uri(url.as_str());
        if body.is_some() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(body.unwrap_or_default())
            .map_err(|err| Error::Serialization(format!("Failed to build request: {err}")))?;

        // Identity whose token the bearer layer will attach; invalid tokens are skipped there.
        let sent_identity = self.store.current_identity().filter(|identity| {
            HeaderValue::from_str(identity.authorization().expose_secret()).is_ok()
        });
        let span = info_span!(
            "api.request",
            http.method = %method,
            url = %url,
            authenticated = sent_identity.is_some()
        );

        let response = self
            .service
            .clone()
            .oneshot(request)
            .instrument(span)
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), %url, "api response");

        if status == StatusCode::UNAUTHORIZED && self.config.logout_on_unauthorized {
            if let Some(identity) = sent_identity {
                if self.store.log_out_if_current(&identity) {
                    warn!(%url, "backend rejected the session token; clearing session");
                } else {
                    debug!(%url, "401 for a replaced session; keeping the current one");
                }
            }
        }

        Ok(response)
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Bytes> {
    serde_json::to_vec(body)
        .map(Bytes::from)
        .map_err(|err| Error::Serialization(format!("Failed to encode request: {err}")))
}

/// Decodes successful JSON responses and surfaces HTTP errors with sanitized bodies.
fn handle_json_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        serde_json::from_slice(response.body())
            .map_err(|err| Error::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(http_error(status, response.body()))
    }
}

fn handle_empty_response(response: HttpResponse) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(http_error(status, response.body()))
    }
}

fn http_error(status: StatusCode, body: &[u8]) -> Error {
    Error::Http {
        status: status.as_u16(),
        message: sanitize_body(&String::from_utf8_lossy(body)),
    }
}

/// Trims and truncates error bodies before they reach the user.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
