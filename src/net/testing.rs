//! In-memory backend used by unit tests in place of the network transport.

use super::{
    client::ApiClient,
    transport::{HttpRequest, HttpResponse},
};
use crate::{config::ClientConfig, error::Error, session::SessionStore};
use bytes::Bytes;
use http::{HeaderMap, Method, Response, StatusCode};
use std::{
    future::{ready, Ready},
    sync::{Arc, Mutex},
    task::{Context, Poll},
};
use tower::Service;

#[derive(Clone, Debug)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Default)]
struct MockState {
    routes: Vec<(Method, String, StatusCode, Bytes)>,
    requests: Vec<RecordedRequest>,
}

/// Answers canned responses by method and path; anything else is a 404.
#[derive(Clone, Default)]
pub(crate) struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    pub fn respond_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).unwrap();
        self.state.lock().unwrap().routes.push((
            method,
            path.to_string(),
            status,
            Bytes::copy_from_slice(body.as_bytes()),
        ));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn client(&self, store: &SessionStore) -> ApiClient {
        self.client_with(ClientConfig::default(), store)
    }

    pub fn client_with(&self, config: ClientConfig, store: &SessionStore) -> ApiClient {
        ApiClient::with_transport(config, store.clone(), self.clone())
    }
}

impl Service<HttpRequest> for MockBackend {
    type Response = HttpResponse;
    type Error = Error;
    type Future = Ready<Result<HttpResponse, Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: HttpRequest) -> Self::Future {
        let mut state = self.state.lock().unwrap();
        let path = request.uri().path().to_string();
        let method = request.method().clone();

        let (status, body) = state
            .routes
            .iter()
            .rev()
            .find(|(m, p, _, _)| *m == method && *p == path)
            .map_or((StatusCode::NOT_FOUND, Bytes::new()), |(_, _, s, b)| {
                (*s, b.clone())
            });

        let (parts, request_body) = request.into_parts();
        state.requests.push(RecordedRequest {
            method,
            path,
            headers: parts.headers,
            body: request_body,
        });

        let mut response = Response::new(body);
        *response.status_mut() = status;
        ready(Ok(response))
    }
}
