//! Bearer credentials attached to backend calls.
//!
//! The client never looks a token up on its own: whoever builds it hands in a
//! [`CredentialProvider`]. [`TokenStore`] is the stock provider, set at login
//! and cleared at logout.

use std::sync::{Arc, RwLock};
use tracing::debug;

/// Source of the bearer token, read once per request
pub trait CredentialProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Shared, clonable token holder
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(token);
        store
    }

    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        debug!("Storing bearer token");
        if let Ok(mut guard) = self.inner.write() {
            *guard = Some(token);
        }
    }

    pub fn clear(&self) {
        debug!("Clearing bearer token");
        if let Ok(mut guard) = self.inner.write() {
            *guard = None;
        }
    }

    pub fn is_set(&self) -> bool {
        self.token().is_some()
    }
}

impl CredentialProvider for TokenStore {
    fn token(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.clone())
            .filter(|t| !t.is_empty())
    }
}

/// Anonymous access; every call goes out without `Authorization`
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn token(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if let Ok(mut out) = self.0.lock() {
                out.extend_from_slice(buf);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_lifecycle() {
        let store = TokenStore::new();
        assert_eq!(store.token(), None);

        store.set("abc123");
        assert_eq!(store.token().as_deref(), Some("abc123"));

        // Clones share the same slot
        let reader = store.clone();
        store.clear();
        assert!(!reader.is_set());
    }

    #[test]
    fn test_empty_token_counts_as_absent() {
        assert_eq!(TokenStore::with_token("").token(), None);
    }

    #[test]
    fn test_token_value_stays_out_of_logs() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || Capture(sink.clone()))
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TokenStore::with_token("sekrit-bearer-42").clear();
        });

        let logs = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Storing bearer token"));
        assert!(!logs.contains("sekrit"));
    }
}
