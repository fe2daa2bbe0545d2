//! SkillSync backend client
//!
//! Typed access to the SkillSync REST API over [`reqwest`].
//!
//! ## Features
//!
//! - Bearer credentials from an injected [`CredentialProvider`]
//! - Per-call timeouts, longer for AI-backed endpoints
//! - Server error bodies unwrapped into [`ApiError::Server`]
//! - One [`SkillsPayload`] classification for the skills endpoint's shapes

#![deny(unsafe_code)]

pub mod backend;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod payload;

pub use backend::DashboardBackend;
pub use client::SkillSyncClient;
pub use config::{timeouts, ClientConfig, DEFAULT_BASE_URL};
pub use credentials::{CredentialProvider, NoCredentials, TokenStore};
pub use error::{ApiError, Result};
pub use payload::SkillsPayload;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{ApiError, ClientConfig, DashboardBackend, SkillSyncClient, TokenStore};
}
