//! Bearer-token injection for outbound requests. The layer reads the session
//! store on every call, so requests issued after login carry the token and
//! requests issued after logout do not. It never rejects a request; the backend
//! reports authorization failures as ordinary HTTP errors.

use crate::session::SessionStore;
use http::{header::AUTHORIZATION, HeaderValue, Request};
use secrecy::ExposeSecret;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::warn;

/// Computes and attaches the `Authorization` header from the session store.
#[derive(Clone, Debug)]
pub struct TokenInjector {
    store: SessionStore,
}

impl TokenInjector {
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Header value for the current identity, if any.
    #[must_use]
    pub fn authorization(&self) -> Option<HeaderValue> {
        let identity = self.store.current_identity()?;
        match HeaderValue::from_str(identity.authorization().expose_secret()) {
            Ok(mut value) => {
                value.set_sensitive(true);
                Some(value)
            }
            Err(_) => {
                warn!(
                    user_id = identity.user_id,
                    "session token is not a valid header value; sending request without it"
                );
                None
            }
        }
    }

    /// Copy-on-write form: returns a new request carrying the header and leaves
    /// `request` untouched, so it can still be retried or inspected.
    #[must_use]
    pub fn intercept<B: Clone>(&self, request: &Request<B>) -> Request<B> {
        self.apply(request.clone())
    }

    /// Owned form used by the service stack.
    #[must_use]
    pub fn apply<B>(&self, mut request: Request<B>) -> Request<B> {
        if let Some(value) = self.authorization() {
            request.headers_mut().insert(AUTHORIZATION, value);
        }
        request
    }
}

/// `tower` layer wrapping a transport with [`TokenInjector`].
#[derive(Clone, Debug)]
pub struct BearerTokenLayer {
    injector: TokenInjector,
}

impl BearerTokenLayer {
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        Self {
            injector: TokenInjector::new(store),
        }
    }
}

impl<S> Layer<S> for BearerTokenLayer {
    type Service = BearerToken<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BearerToken {
            inner,
            injector: self.injector.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BearerToken<S> {
    inner: S,
    injector: TokenInjector,
}

impl<S, B> Service<Request<B>> for BearerToken<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        self.inner.call(self.injector.apply(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionIdentity;
    use bytes::Bytes;
    use http::{header::CONTENT_TYPE, Method, Response};
    use secrecy::SecretString;
    use std::{
        convert::Infallible,
        sync::{Arc, Mutex},
    };
    use tower::{service_fn, ServiceBuilder, ServiceExt};

    fn identity(token: &str) -> SessionIdentity {
        SessionIdentity {
            token: SecretString::from(token),
            token_type: "Bearer".to_string(),
            user_id: 1,
            username: "test@test.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            is_admin: false,
        }
    }

    fn request(method: Method, uri: &str) -> Request<Bytes> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Custom-Header", "custom-value")
            .header(CONTENT_TYPE, "application/json")
            .body(Bytes::from_static(b"{\"data\":\"test\"}"))
            .unwrap()
    }

    #[test]
    fn adds_header_when_logged_in() {
        let store = SessionStore::new();
        store.log_in(identity("test-token-123"));

        let out = TokenInjector::new(store).intercept(&request(Method::GET, "/api/test"));
        assert_eq!(
            out.headers().get(AUTHORIZATION).unwrap(),
            "Bearer test-token-123"
        );
        assert!(out.headers().get(AUTHORIZATION).unwrap().is_sensitive());
    }

    #[test]
    fn leaves_request_untouched_when_anonymous() {
        let injector = TokenInjector::new(SessionStore::new());
        let original = request(Method::POST, "/api/session");

        let out = injector.intercept(&original);
        assert!(out.headers().get(AUTHORIZATION).is_none());
        assert_eq!(out.method(), original.method());
        assert_eq!(out.uri(), original.uri());
        assert_eq!(out.headers(), original.headers());
        assert_eq!(out.body(), original.body());
    }

    #[test]
    fn preserves_other_headers_and_body() {
        let store = SessionStore::new();
        store.log_in(identity("preserve-token"));
        let original = request(Method::PUT, "/api/session/1");

        let out = TokenInjector::new(store).intercept(&original);
        assert_eq!(out.headers().get("Custom-Header").unwrap(), "custom-value");
        assert_eq!(out.headers().get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(out.body(), original.body());
        assert_eq!(out.headers().len(), original.headers().len() + 1);
    }

    #[test]
    fn does_not_mutate_the_original() {
        let store = SessionStore::new();
        store.log_in(identity("cow-token"));
        let original = request(Method::GET, "/api/test");

        let _ = TokenInjector::new(store).intercept(&original);
        assert!(original.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn works_for_every_method() {
        let store = SessionStore::new();
        store.log_in(identity("method-token"));
        let injector = TokenInjector::new(store);

        for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
            let out = injector.intercept(&request(method, "/api/test"));
            assert_eq!(
                out.headers().get(AUTHORIZATION).unwrap(),
                "Bearer method-token"
            );
        }
    }

    #[test]
    fn follows_login_state_between_requests() {
        let store = SessionStore::new();
        let injector = TokenInjector::new(store.clone());

        assert!(injector.authorization().is_none());
        store.log_in(identity("test-token-789"));
        assert_eq!(injector.authorization().unwrap(), "Bearer test-token-789");
        store.log_out();
        assert!(injector.authorization().is_none());
    }

    #[test]
    fn invalid_token_is_skipped() {
        let store = SessionStore::new();
        store.log_in(identity("bad\ntoken"));
        let out = TokenInjector::new(store).intercept(&request(Method::GET, "/api/test"));
        assert!(out.headers().get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn layer_injects_into_inner_service() {
        let store = SessionStore::new();
        store.log_in(identity("admin-token-456"));
        let seen: Arc<Mutex<Vec<Option<String>>>> = Arc::default();
        let recorder = seen.clone();

        let service = ServiceBuilder::new()
            .layer(BearerTokenLayer::new(store.clone()))
            .service(service_fn(move |req: Request<Bytes>| {
                let recorder = recorder.clone();
                async move {
                    let header = req
                        .headers()
                        .get(AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    recorder.lock().unwrap().push(header);
                    Ok::<_, Infallible>(Response::new(Bytes::new()))
                }
            }));

        service
            .clone()
            .oneshot(request(Method::POST, "/api/admin/test"))
            .await
            .unwrap();
        store.log_out();
        service
            .oneshot(request(Method::GET, "/api/test"))
            .await
            .unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![Some("Bearer admin-token-456".to_string()), None]
        );
    }
}
