use std::fmt;
use strum::Display;

/// Failure taxonomy for adapter and transport operations. The code is
/// stable and machine-matchable; the message is for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MarshalError,
    BadRequest,
    BadStatus,
    ParseError,
    Timeout,
    ConnectionError,
    ResponseTooLarge,
}

/// A single adapter failure attributed to one bidder.
///
/// Renders as `[CODE] bidder=N: message (cause)` with the parenthesized
/// cause omitted when absent. The cause chains through
/// [`std::error::Error::source`] so callers can downcast transport
/// errors.
#[derive(Debug)]
pub struct AdapterError {
    pub bidder: String,
    pub code: ErrorCode,
    pub message: String,
    cause: Option<anyhow::Error>,
}

impl AdapterError {
    pub fn new(bidder: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            bidder: bidder.into(),
            code,
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<anyhow::Error>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn marshal(bidder: impl Into<String>, cause: impl Into<anyhow::Error>) -> Self {
        Self::new(bidder, ErrorCode::MarshalError, "failed to serialize outbound request")
            .with_cause(cause)
    }

    pub fn bad_request(bidder: impl Into<String>, body_excerpt: &str) -> Self {
        Self::new(
            bidder,
            ErrorCode::BadRequest,
            format!("remote rejected request: {body_excerpt}"),
        )
    }

    pub fn bad_status(bidder: impl Into<String>, status: u16) -> Self {
        Self::new(
            bidder,
            ErrorCode::BadStatus,
            format!("unexpected status code {status}"),
        )
    }

    pub fn parse(bidder: impl Into<String>, cause: impl Into<anyhow::Error>) -> Self {
        Self::new(bidder, ErrorCode::ParseError, "failed to parse response body").with_cause(cause)
    }

    pub fn timeout(bidder: impl Into<String>) -> Self {
        Self::new(bidder, ErrorCode::Timeout, "deadline elapsed before response completed")
    }

    pub fn connection(bidder: impl Into<String>, cause: impl Into<anyhow::Error>) -> Self {
        Self::new(bidder, ErrorCode::ConnectionError, "network failure").with_cause(cause)
    }

    pub fn response_too_large(bidder: impl Into<String>, cap: usize) -> Self {
        Self::new(
            bidder,
            ErrorCode::ResponseTooLarge,
            format!("response body exceeds {cap} byte cap"),
        )
    }
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] bidder={}: {}", self.code, self.bidder, self.message)?;
        if let Some(cause) = &self.cause {
            write!(f, " ({cause})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AdapterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| -> &(dyn std::error::Error + 'static) { cause.as_ref() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_without_cause() {
        let err = AdapterError::bad_status("nimbus", 503);
        assert_eq!(
            err.to_string(),
            "[BAD_STATUS] bidder=nimbus: unexpected status code 503"
        );
    }

    #[test]
    fn test_display_with_cause() {
        let inner = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err = AdapterError::parse("nimbus", inner);
        let rendered = err.to_string();
        assert!(rendered.starts_with("[PARSE_ERROR] bidder=nimbus: failed to parse response body ("));
        assert!(rendered.ends_with(')'));
    }

    #[test]
    fn test_code_display_screaming_snake() {
        assert_eq!(ErrorCode::ResponseTooLarge.to_string(), "RESPONSE_TOO_LARGE");
        assert_eq!(ErrorCode::MarshalError.to_string(), "MARSHAL_ERROR");
        assert_eq!(ErrorCode::ConnectionError.to_string(), "CONNECTION_ERROR");
    }

    #[test]
    fn test_source_chains_cause() {
        let inner = serde_json::from_str::<serde_json::Value>("oops").unwrap_err();
        let err = AdapterError::parse("nimbus", inner);
        assert!(err.source().is_some());
        assert!(AdapterError::timeout("nimbus").source().is_none());
    }
}
