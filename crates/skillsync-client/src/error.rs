//! Error types for backend calls

use std::time::Duration;
use thiserror::Error;

/// Backend client errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS or body transfer failure
    #[error("Transport error during {operation}: {source}")]
    Transport {
        /// Operation that failed
        operation: &'static str,
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// No response within the per-call timeout
    #[error("{operation} timed out after {}s", .after.as_secs_f64())]
    Timeout {
        /// Operation that timed out
        operation: &'static str,
        /// Timeout that elapsed
        after: Duration,
    },

    /// Non-2xx response
    #[error("Server returned {status} for {operation}: {}", .message.as_deref().unwrap_or("no details"))]
    Server {
        /// Operation that failed
        operation: &'static str,
        /// HTTP status code
        status: u16,
        /// The body's `error` (or `message`) string, when present
        message: Option<String>,
    },

    /// Body did not match the expected shape
    #[error("Invalid response for {operation}: {source}")]
    Decode {
        /// Operation whose body failed to parse
        operation: &'static str,
        /// Parse failure
        #[source]
        source: serde_json::Error,
    },

    /// Client construction error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub(crate) fn from_reqwest(operation: &'static str, after: Duration, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            ApiError::Timeout { operation, after }
        } else {
            ApiError::Transport { operation, source }
        }
    }

    /// Message for the person who triggered the call: the server's own
    /// wording when it sent one, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }

    /// HTTP status for server-reported errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull the human-readable error out of an error body
pub(crate) fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_prefers_error_field() {
        assert_eq!(
            server_message(r#"{"error":"Already connected","message":"ignored"}"#).as_deref(),
            Some("Already connected")
        );
        assert_eq!(server_message(r#"{"message":"Token expired"}"#).as_deref(), Some("Token expired"));
        assert_eq!(server_message(r#"{"error":{"code":1}}"#), None);
        assert_eq!(server_message("<html>Bad gateway</html>"), None);
    }

    #[test]
    fn test_user_message_falls_back() {
        let with_message = ApiError::Server {
            operation: "send connection",
            status: 400,
            message: Some("Connection request already exists".into()),
        };
        let without_message = ApiError::Server {
            operation: "send connection",
            status: 502,
            message: None,
        };
        let timeout = ApiError::Timeout {
            operation: "send connection",
            after: Duration::from_secs(10),
        };

        assert_eq!(with_message.user_message("Failed"), "Connection request already exists");
        assert_eq!(without_message.user_message("Failed"), "Failed");
        assert_eq!(timeout.user_message("Failed"), "Failed");
        assert!(timeout.is_timeout());
        assert_eq!(with_message.status(), Some(400));
    }

    #[test]
    fn test_display() {
        let err = ApiError::Timeout {
            operation: "analyze linkedin",
            after: Duration::from_secs(50),
        };
        assert_eq!(err.to_string(), "analyze linkedin timed out after 50s");
    }
}
