use thiserror::Error;

/// Maximum response body size accepted from the room backend (16 MB).
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status} for {url}")]
    Http { status: reqwest::StatusCode, url: String },

    #[error("Backend rejected request: {0}")]
    Backend(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Response too large ({size} bytes, max {MAX_RESPONSE_SIZE})")]
    ResponseTooLarge { size: u64 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidInput(format!("invalid url: {err}"))
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_http() {
        let err = Error::Http {
            status: reqwest::StatusCode::NOT_FOUND,
            url: "https://example.com/api/get-rooms".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP error 404 Not Found for https://example.com/api/get-rooms"
        );
    }

    #[test]
    fn test_error_display_backend() {
        let err = Error::Backend("room already exists".to_string());
        assert_eq!(err.to_string(), "Backend rejected request: room already exists");
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = match serde_json::from_str::<serde_json::Value>("{not json") {
            Ok(value) => panic!("expected parse failure, got {value}"),
            Err(err) => err,
        };
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_error_from_url() {
        let err: Error = match url::Url::parse("::nope") {
            Ok(url) => panic!("expected parse failure, got {url}"),
            Err(err) => err.into(),
        };
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_response_too_large_mentions_limit() {
        let msg = Error::ResponseTooLarge { size: 20_000_000 }.to_string();
        assert!(msg.contains("20000000"));
        assert!(msg.contains(&MAX_RESPONSE_SIZE.to_string()));
    }
}
