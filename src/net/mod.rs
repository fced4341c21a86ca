//! HTTP plumbing for the studio API: the transport, the bearer-token layer, and
//! the JSON client the feature modules build on.

mod client;
mod interceptor;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ApiClient, HttpService};
pub use interceptor::{BearerToken, BearerTokenLayer, TokenInjector};
pub use transport::{BoxFuture, HttpRequest, HttpResponse, ReqwestTransport};
