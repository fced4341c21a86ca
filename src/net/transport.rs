//! Network transport for the API stack: a `tower::Service` that executes
//! `http::Request<Bytes>` with `reqwest` and buffers the response body. Keeping
//! the transport behind `Service` lets tests swap in an in-memory double.

use crate::{config::ClientConfig, error::Error};
use bytes::Bytes;
use http::{Request, Response};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tower::Service;

pub type HttpRequest = Request<Bytes>;
pub type HttpResponse = Response<Bytes>;
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// # Errors
    /// Returns `Error::Config` if the underlying client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|err| Error::Config(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { client })
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// Maps transport failures, separating timeouts from other network errors.
pub(crate) fn map_request_error(err: &reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        Error::Serialization(format!("Failed to build request: {err}"))
    } else {
        Error::Network(format!("Unable to reach the server: {err}"))
    }
}

impl Service<HttpRequest> for ReqwestTransport {
    type Response = HttpResponse;
    type Error = Error;
    type Future = BoxFuture<Result<HttpResponse, Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: HttpRequest) -> Self::Future {
        let client = self.client.clone();
        Box::pin(async move {
            let request = reqwest::Request::try_from(request)
                .map_err(|err| Error::Serialization(format!("Failed to build request: {err}")))?;
            let response = client
                .execute(request)
                .await
                .map_err(|err| map_request_error(&err))?;

            let status = response.status();
            let headers = response.headers().clone();
            let body = response
                .bytes()
                .await
                .map_err(|err| map_request_error(&err))?;

            let mut out = Response::new(body);
            *out.status_mut() = status;
            *out.headers_mut() = headers;
            Ok(out)
        })
    }
}
