//! Error types for keyword counting.
//!
//! Per-keyword failures ([`SearchError::Api`], [`SearchError::Http`],
//! [`SearchError::Timeout`], [`SearchError::Parse`], [`SearchError::Internal`])
//! are absorbed by the dispatcher and recorded as a zero total. The remaining
//! variants abort a run before any query is issued.

use reqwest::StatusCode;

/// Process exit code for a successful run.
pub const EXIT_CODE_OK: i32 = 0;
/// Process exit code for a generic fatal error.
pub const EXIT_CODE_ERROR: i32 = 11;
/// Process exit code when command-line flags cannot be parsed.
pub const EXIT_CODE_PARSE_FLAGS_ERROR: i32 = 12;
/// Process exit code when no usable keyword was given.
pub const EXIT_CODE_BAD_ARGS: i32 = 13;

/// Errors that can occur while counting keywords.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// No keyword survived sanitization.
    #[error("invalid argument: you must set at least one keyword")]
    NoKeywords,

    /// No GitHub token in the flags, environment or config file.
    #[error("GitHub token not provided; set GITHUB_TOKEN or pass --token")]
    MissingToken,

    /// The search API answered with a non-success status.
    #[error("{status}\n{body}")]
    Api { status: StatusCode, body: String },

    /// The HTTP request itself failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A query did not finish within its time budget.
    #[error("query timed out: {0}")]
    Timeout(String),

    /// The response body could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A dispatcher invariant was broken.
    #[error("internal error: {0}")]
    Internal(String),

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// Exit code the `ghkw` binary reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            SearchError::NoKeywords => EXIT_CODE_BAD_ARGS,
            _ => EXIT_CODE_ERROR,
        }
    }
}

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_no_keywords() {
        let err = SearchError::NoKeywords;
        assert_eq!(
            err.to_string(),
            "invalid argument: you must set at least one keyword"
        );
    }

    #[test]
    fn display_api_includes_status_and_body() {
        let err = SearchError::Api {
            status: StatusCode::FORBIDDEN,
            body: "API rate limit exceeded".into(),
        };
        assert_eq!(err.to_string(), "403 Forbidden\nAPI rate limit exceeded");
    }

    #[test]
    fn display_timeout() {
        let err = SearchError::Timeout("exceeded 30s limit".into());
        assert_eq!(err.to_string(), "query timed out: exceeded 30s limit");
    }

    #[test]
    fn display_internal() {
        let err = SearchError::Internal("dispatcher semaphore closed".into());
        assert_eq!(err.to_string(), "internal error: dispatcher semaphore closed");
        assert_eq!(err.exit_code(), EXIT_CODE_ERROR);
    }

    #[test]
    fn exit_codes() {
        assert_eq!(SearchError::NoKeywords.exit_code(), EXIT_CODE_BAD_ARGS);
        assert_eq!(SearchError::MissingToken.exit_code(), EXIT_CODE_ERROR);
        assert_eq!(
            SearchError::Config("bad".into()).exit_code(),
            EXIT_CODE_ERROR
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
