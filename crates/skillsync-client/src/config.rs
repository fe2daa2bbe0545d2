//! Configuration types for the backend client

use std::time::Duration;

/// Backend used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Timeout for endpoints that do not carry their own
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-endpoint timeouts. AI-backed endpoints wait for generation.
pub mod timeouts {
    use std::time::Duration;

    pub const DASHBOARD: Duration = Duration::from_secs(10);
    pub const CONNECTIONS: Duration = Duration::from_secs(10);
    pub const BANNER_TODAY: Duration = Duration::from_secs(15);
    pub const BANNER_GENERATE: Duration = Duration::from_secs(60);
    pub const BANNER_HISTORY: Duration = Duration::from_secs(10);
    pub const PROFILE_INSIGHTS: Duration = Duration::from_secs(35);
    pub const AI_GENERATION: Duration = Duration::from_secs(50);
    pub const AI_STATUS: Duration = Duration::from_secs(5);
}

/// Backend client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL including the `/api` prefix
    pub base_url: String,
    /// Timeout for endpoints without a dedicated one
    pub default_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }
}
