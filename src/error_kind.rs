//! Error kinds for the Z.ai API.
//!
//! Every [`Error`](crate::Error) maps onto exactly one [`ErrorKind`]. The kind is
//! what callers should branch on; messages are for humans.
//!
//! | HTTP status | Kind              | Retried |
//! |-------------|-------------------|---------|
//! | 400         | `BadRequest`      | no      |
//! | 401         | `Authentication`  | no      |
//! | 429         | `RateLimited`     | yes     |
//! | 500         | `InternalServer`  | yes     |
//! | 503         | `Overloaded`      | yes     |
//! | other ≥ 400 | `Status`          | yes     |
//!
//! ```rust
//! use zai_sdk::ErrorKind;
//!
//! let kind = ErrorKind::from_http_status(429);
//! assert_eq!(kind, ErrorKind::RateLimited);
//! assert!(kind.retryable());
//! assert_eq!(kind.name(), "rate_limited");
//! ```

use std::fmt;

/// Discriminant shared by every error the client can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Construction, marshal, decode and stream errors
    Generic,
    /// 400: malformed request or invalid parameters
    BadRequest,
    /// 401: invalid, expired or missing API key
    Authentication,
    /// 429: request rate or quota limit reached
    RateLimited,
    /// 500: provider-side failure
    InternalServer,
    /// 503: provider temporarily overloaded
    Overloaded,
    /// Transport failure or deadline exceeded before a response arrived
    Timeout,
    /// Any other HTTP status ≥ 400
    Status,
    /// The caller cancelled the request context
    Cancelled,
}

impl ErrorKind {
    /// Map an HTTP status code to a kind. Total: unmapped codes are `Status`.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Authentication,
            429 => Self::RateLimited,
            500 => Self::InternalServer,
            503 => Self::Overloaded,
            _ => Self::Status,
        }
    }

    /// Snake-case name, stable across releases.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::BadRequest => "bad_request",
            Self::Authentication => "authentication",
            Self::RateLimited => "rate_limited",
            Self::InternalServer => "internal_server",
            Self::Overloaded => "overloaded",
            Self::Timeout => "timeout",
            Self::Status => "status",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the retry loop may try again after a failure of this kind.
    ///
    /// `Generic` is excluded here because generic failures (bad config, marshal,
    /// decode) are deterministic; body-read failures opt in separately through
    /// [`Error::is_retryable`](crate::Error::is_retryable).
    #[inline]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited
                | Self::InternalServer
                | Self::Overloaded
                | Self::Timeout
                | Self::Status
        )
    }

    /// Whether this kind came from an HTTP status classification.
    pub fn is_http(&self) -> bool {
        matches!(
            self,
            Self::BadRequest
                | Self::Authentication
                | Self::RateLimited
                | Self::InternalServer
                | Self::Overloaded
                | Self::Status
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
