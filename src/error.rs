use crate::error_kind::ErrorKind;
use crate::transport::TransportError;
use thiserror::Error;

/// Structured context attached to configuration errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field or configuration key that caused the error (e.g. "api_key", "video.model")
    pub field_path: Option<String>,
    /// Additional detail, such as the rejected value
    pub details: Option<String>,
    /// Component that raised the error (e.g. "client_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// A failure classified from an HTTP status code and the provider's error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("zai: {message} (status: {status}, type: {error_type}, code: {code})")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub status: u16,
    pub message: String,
    /// Provider `error.type`, empty when the body was not an error envelope
    pub error_type: String,
    /// Provider `error.code`, empty when the body was not an error envelope
    pub code: String,
}

/// Unified error type for the client.
///
/// Branch on [`Error::kind`] rather than on variants when only the category matters.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Serialization error: failed to marshal request body: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Request timed out: {message}")]
    Timeout {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Decode error: failed to unmarshal response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Stream error: {message}")]
    Stream {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Request cancelled")]
    Cancelled,
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// A required argument was empty (e.g. a result id).
    pub fn missing_argument(field: &str) -> Self {
        Error::configuration_with_context(
            format!("{} must be provided", field),
            ErrorContext::new().with_field_path(field),
        )
    }

    pub(crate) fn timeout(msg: impl Into<String>, source: Option<reqwest::Error>) -> Self {
        Error::Timeout {
            message: msg.into(),
            source,
        }
    }

    pub(crate) fn stream(
        msg: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Stream {
            message: msg.into(),
            source: Some(source.into()),
        }
    }

    /// The category of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Api(e) => e.kind,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Cancelled => ErrorKind::Cancelled,
            Error::Configuration { .. }
            | Error::Serialization(_)
            | Error::Transport(_)
            | Error::Decode(_)
            | Error::Stream { .. } => ErrorKind::Generic,
        }
    }

    /// Whether the retry loop should make another attempt after this error.
    ///
    /// Body-read failures are `Generic` but transient, so they are retried too.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(_) => true,
            other => other.kind().retryable(),
        }
    }

    /// HTTP status for classified API errors.
    pub fn status(&self) -> Option<u16> {
        self.api_error().map(|e| e.status)
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}
