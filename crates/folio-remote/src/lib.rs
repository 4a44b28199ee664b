//! # folio-remote
//!
//! HTTP client for the Folio content backend (a Strapi-style REST API).
//!
//! Every collection is addressed as `/api/{collection}`:
//! - lookup by slug: `GET ?filters[slug][$eq]={key}`
//! - create: `POST` with `{ "data": {...} }`
//! - update: `PUT /{id}` with the same envelope
//! - upload: `POST /api/upload` (multipart `files`)
//!
//! All requests carry a bearer token. Transient failures are retried per
//! [`RetryPolicy`]; everything else is surfaced as a [`RemoteError`].

mod entities;
mod error;
mod http;
mod retry;
mod store;
mod upload;
mod wire;

pub use error::RemoteError;
pub use retry::RetryPolicy;
pub use store::RemoteStore;
pub use wire::Page;

use std::time::Duration;

use folio_core::EntityKind;

/// Settings for building a [`RemoteClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Backend origin, without the `/api` suffix.
    pub base_url: String,
    /// Bearer token.
    pub token: String,
    /// Per-request timeout.
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl ClientOptions {
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

/// HTTP client for the content API.
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    retry: RetryPolicy,
}

impl RemoteClient {
    /// Build a client from `options`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the underlying `reqwest::Client`
    /// fails to build (for example, no TLS backend is available).
    pub fn new(options: ClientOptions) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .timeout(options.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: options.base_url.trim_end_matches('/').to_string(),
            token: options.token,
            retry: options.retry,
        })
    }

    /// Backend origin this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/api/{collection}`
    fn collection_url(&self, kind: EntityKind) -> String {
        format!("{}/api/{}", self.base_url, kind.collection())
    }
}
