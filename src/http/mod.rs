//! HTTP transport with retry classification.
//!
//! A [`Transport`] performs exactly one round trip and knows nothing about
//! API keys, retries or status codes. Retry decisions live in `retry`, and
//! status mapping lives in the [`Client`](crate::Client).

mod client;
mod retry;

use async_trait::async_trait;
use std::fmt;
use std::io::ErrorKind;

pub use client::ReqwestTransport;
pub(crate) use retry::{RetryPolicy, with_retry};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// HTTP methods supported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// A fully resolved request, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Query string parameters.
    pub query: Vec<(String, String)>,
    /// URL-encoded form body, only sent for POST.
    pub form: Vec<(String, String)>,
}

/// A raw response as received from the server.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    /// True if the content type is some flavour of JSON (`application/json`,
    /// `application/problem+json`, ...), ignoring parameters like `charset`.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|mime| mime.trim().to_ascii_lowercase().ends_with("json"))
            .unwrap_or(false)
    }

    /// Decodes the body. JSON bodies are parsed, a blank JSON body decodes
    /// to `null`; anything else is returned as a JSON string holding the raw
    /// text.
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        if self.is_json() && self.body.trim().is_empty() {
            Ok(serde_json::Value::Null)
        } else if self.is_json() {
            serde_json::from_str(&self.body)
        } else {
            Ok(serde_json::Value::String(self.body.clone()))
        }
    }
}

/// Failure of the network call itself, before any HTTP status is available.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection or read timed out.
    #[error("Request timed out: {0}")]
    Timeout(#[source] BoxError),
    /// The connection was refused, reset, or could not be established.
    #[error("Connection failed: {0}")]
    Connect(#[source] BoxError),
    /// Anything else: invalid URL, body errors, TLS setup, ...
    #[error("Request failed: {0}")]
    Request(#[source] BoxError),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout(Box::new(error))
        } else if error.is_connect() || is_dropped_connection(&error) {
            TransportError::Connect(Box::new(error))
        } else {
            TransportError::Request(Box::new(error))
        }
    }
}

/// True if the server closed or reset an established connection, which
/// reqwest reports as a plain request or body error.
fn is_dropped_connection(error: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(error);
    while let Some(err) = source {
        if let Some(hyper_err) = err.downcast_ref::<hyper::Error>() {
            if hyper_err.is_incomplete_message() || hyper_err.is_closed() || hyper_err.is_canceled() {
                return true;
            }
        }
        if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
            if matches!(
                io_err.kind(),
                ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::BrokenPipe
                    | ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }
        source = err.source();
    }
    false
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one HTTP round trip.
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}
