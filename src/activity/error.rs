//! Activity feed error types
//!
//! Every variant is recoverable: the poller logs it, keeps the last good
//! snapshot and tries again on the next tick.

use thiserror::Error;

/// Errors that can occur while fetching an activity log
#[derive(Error, Debug)]
pub enum FeedError {
    /// Network or transport failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Body was not a `{ "log": [...] }` container
    #[error("Malformed activity log: {0}")]
    Malformed(#[from] serde_json::Error),

    /// No subject to fetch
    #[error("Subject identifier is empty")]
    EmptySubject,
}

impl FeedError {
    /// Short label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::Transport(_) => "transport",
            FeedError::Status { .. } => "status",
            FeedError::Malformed(_) => "malformed",
            FeedError::EmptySubject => "empty_subject",
        }
    }
}

/// Result type alias for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FeedError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected status 502: bad gateway");
        assert_eq!(err.kind(), "status");

        assert_eq!(
            FeedError::EmptySubject.to_string(),
            "Subject identifier is empty"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FeedError = json_err.into();
        assert!(matches!(err, FeedError::Malformed(_)));
        assert_eq!(err.kind(), "malformed");
    }
}
