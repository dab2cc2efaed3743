use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// The error type for spacesign operations
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    body: Option<String>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Payload, path or header value can't be represented for hashing or sending
    Encoding,

    /// Network or connection failure reported by the transport
    Transport,

    /// The service answered with a non-success status code
    HttpStatus,

    /// Request cannot be signed (reserved header supplied, missing fields, etc.)
    RequestInvalid,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,

    /// Unexpected errors
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            body: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message without the kind prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status code returned by the service, only set for [`ErrorKind::HttpStatus`].
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Raw response body returned by the service, only set for [`ErrorKind::HttpStatus`].
    ///
    /// The body is kept verbatim, S3 error documents are not interpreted.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

// Convenience constructors
impl Error {
    /// Create an encoding error
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Encoding, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create an http status error carrying the response status and body.
    pub fn http_status(status: StatusCode, body: impl Into<String>) -> Self {
        let mut err = Self::new(
            ErrorKind::HttpStatus,
            format!("service responded with status {status}"),
        );
        err.status = Some(status);
        err.body = Some(body.into());
        err
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Encoding => write!(f, "encoding error"),
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::HttpStatus => write!(f, "http status error"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::encoding(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::encoding(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Self::encoding(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::encoding(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_error_keeps_body() {
        let body = "<Error><Code>AccessDenied</Code></Error>";
        let err = Error::http_status(StatusCode::FORBIDDEN, body);

        assert_eq!(err.kind(), ErrorKind::HttpStatus);
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(err.body(), Some(body));
        assert_eq!(
            err.to_string(),
            "http status error: service responded with status 403 Forbidden"
        );
    }

    #[test]
    fn test_non_status_errors_have_no_response() {
        let err = Error::transport("connection refused");

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.message(), "connection refused");
        assert!(err.status().is_none());
        assert!(err.body().is_none());
    }

    #[test]
    fn test_invalid_header_value_is_encoding_error() {
        let err: Error = http::HeaderValue::from_str("bad\nvalue")
            .expect_err("newline is not a valid header value")
            .into();

        assert_eq!(err.kind(), ErrorKind::Encoding);
    }
}
