//! Transient messages shown after an action

use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// Lifetime of most success notices
pub const SHORT_NOTICE: Duration = Duration::from_secs(3);

/// Lifetime of the career inspiration notice
pub const LONG_NOTICE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// One message for the person using the dashboard
///
/// Success notices carry an expiry. Info and error notices stay until they
/// are replaced or dismissed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    #[serde(skip)]
    expires_at: Option<Instant>,
}

impl Notice {
    pub fn success(message: impl Into<String>, lifetime: Duration) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            expires_at: Some(Instant::now() + lifetime),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
            expires_at: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            expires_at: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}
