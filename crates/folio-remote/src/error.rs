//! Remote backend error types.

use folio_core::EntityKind;
use thiserror::Error;

/// Errors that can occur when talking to the content backend.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP transport error (connect, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A read request returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Response body.
        message: String,
    },

    /// A create, update or upload returned a non-success status code.
    #[error("{kind} write rejected ({status}): {body}")]
    Write {
        kind: EntityKind,
        status: u16,
        body: String,
    },

    /// The backend returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse a backend response.
    #[error("parse error: {0}")]
    Parse(String),

    /// A local file could not be read for upload.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RemoteError {
    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Write { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            Self::Http(error) => error.status().map(|s| s.as_u16()),
            Self::Parse(_) | Self::Io { .. } => None,
        }
    }

    /// Whether repeating the same request may succeed.
    ///
    /// Transport failures, 429 and 5xx are transient; any other 4xx is not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(error) => error.is_timeout() || error.is_connect() || error.is_request(),
            Self::RateLimited { .. } => true,
            Self::Api { status, .. } | Self::Write { status, .. } => *status >= 500,
            Self::Parse(_) | Self::Io { .. } => false,
        }
    }

    /// Whether a request that creates something may be sent again.
    ///
    /// Narrower than [`is_retryable`](Self::is_retryable): a timeout or a
    /// failure after the body went out may have created the record already,
    /// so only refused connections, 429 and 5xx qualify.
    #[must_use]
    pub fn is_resendable(&self) -> bool {
        match self {
            Self::Http(error) => error.is_connect(),
            other => other.is_retryable(),
        }
    }

    /// Re-tag a non-success response from a mutating call as a write error.
    #[must_use]
    pub fn into_write(self, kind: EntityKind) -> Self {
        match self {
            Self::Api { status, message } => Self::Write {
                kind,
                status,
                body: message,
            },
            Self::RateLimited { retry_after_secs } => Self::Write {
                kind,
                status: 429,
                body: format!("rate limited, retry after {retry_after_secs}s"),
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable() {
        let err = RemoteError::Api {
            status: 503,
            message: String::new(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn client_errors_are_not_retryable() {
        for status in [400, 401, 403, 404, 422] {
            let err = RemoteError::Write {
                kind: EntityKind::Tag,
                status,
                body: String::new(),
            };
            assert!(!err.is_retryable(), "{status} should not retry");
        }
    }

    #[test]
    fn rate_limit_is_retryable() {
        assert!(RemoteError::RateLimited { retry_after_secs: 1 }.is_retryable());
    }

    #[tokio::test]
    async fn timed_out_create_is_not_resent() {
        // Accepts the connection and never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _hold = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            std::future::pending::<()>().await;
        });

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(100))
            .build()
            .unwrap();
        let err = RemoteError::Http(
            client
                .post(format!("http://{addr}/api/tags"))
                .send()
                .await
                .unwrap_err(),
        );

        assert!(err.is_retryable());
        assert!(!err.is_resendable());
    }

    #[tokio::test]
    async fn refused_connection_is_resendable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = RemoteError::Http(
            reqwest::Client::new()
                .post(format!("http://{addr}/api/tags"))
                .send()
                .await
                .unwrap_err(),
        );

        assert!(err.is_resendable());
    }

    #[test]
    fn server_errors_and_rate_limits_are_resendable() {
        let err = RemoteError::Api {
            status: 502,
            message: String::new(),
        };
        assert!(err.is_resendable());
        assert!(RemoteError::RateLimited { retry_after_secs: 1 }.is_resendable());
        let rejected = RemoteError::Write {
            kind: EntityKind::Tag,
            status: 409,
            body: String::new(),
        };
        assert!(!rejected.is_resendable());
    }

    #[test]
    fn into_write_keeps_status_and_body() {
        let err = RemoteError::Api {
            status: 400,
            message: "slug must be unique".into(),
        }
        .into_write(EntityKind::Category);

        match err {
            RemoteError::Write { kind, status, body } => {
                assert_eq!(kind, EntityKind::Category);
                assert_eq!(status, 400);
                assert_eq!(body, "slug must be unique");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn write_error_message_names_entity() {
        let err = RemoteError::Write {
            kind: EntityKind::Project,
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "project write rejected (500): boom");
        assert_eq!(err.status(), Some(500));
    }
}
