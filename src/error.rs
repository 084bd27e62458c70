//! Error taxonomy for API calls.

use std::fmt;

use crate::http::TransportError;

/// Status code the API uses to report a server-side verification timeout.
pub const TIMEOUT_STATUS: u16 = 249;

/// Kind of failure reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// HTTP 400
    BadRequest,
    /// HTTP 401
    Unauthorized,
    /// HTTP 402, usually out of credits
    PaymentRequired,
    /// HTTP 403
    Forbidden,
    /// HTTP 404
    NotFound,
    /// HTTP 429
    TooManyRequests,
    /// HTTP 500
    InternalServer,
    /// HTTP 503
    ServiceUnavailable,
    /// HTTP 249, the verification did not finish within the server's time limit
    Timeout,
    /// Any other non-2xx status
    UnexpectedStatus,
}

impl ApiErrorKind {
    /// Maps a non-2xx HTTP status to its error kind.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            402 => Self::PaymentRequired,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            429 => Self::TooManyRequests,
            500 => Self::InternalServer,
            503 => Self::ServiceUnavailable,
            TIMEOUT_STATUS => Self::Timeout,
            _ => Self::UnexpectedStatus,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BadRequest => "bad request",
            Self::Unauthorized => "unauthorized",
            Self::PaymentRequired => "payment required",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not found",
            Self::TooManyRequests => "too many requests",
            Self::InternalServer => "internal server error",
            Self::ServiceUnavailable => "service unavailable",
            Self::Timeout => "verification timed out",
            Self::UnexpectedStatus => "unexpected status",
        };
        f.write_str(name)
    }
}

/// An error status returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} (HTTP {code}): {message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub code: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::from_status(code),
            code,
            message: message.into(),
        }
    }
}

/// Errors returned by [`Client`](crate::Client) and the top-level functions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The network call itself failed; the transport's error is kept as-is.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to decode JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Returns the API error kind, if this is an API error.
    pub fn kind(&self) -> Option<ApiErrorKind> {
        match self {
            Error::Api(e) => Some(e.kind),
            _ => None,
        }
    }

    /// Returns the HTTP status code, if this is an API error.
    pub fn code(&self) -> Option<u16> {
        match self {
            Error::Api(e) => Some(e.code),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
