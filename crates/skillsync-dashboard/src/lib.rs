//! SkillSync dashboard synchronization
//!
//! Keeps a session's dashboard state consistent with the backend:
//!
//! - concurrent, fault-isolated refresh of the dashboard aggregate and skills
//! - mutating actions guarded per control, each followed by one refresh
//! - success, info and error notices with expiry
//! - cancellation so nothing is written after shutdown

#![deny(unsafe_code)]

mod busy;
pub mod error;
pub mod notice;
pub mod state;
pub mod sync;

pub use busy::Control;
pub use error::ActionError;
pub use notice::{Notice, NoticeKind, LONG_NOTICE, SHORT_NOTICE};
pub use state::{DashboardState, DashboardView, FetchFailure, FetchSource, RefreshOutcome};
pub use sync::DashboardSync;

// Re-export so callers can share a token without importing tokio-util
pub use tokio_util::sync::CancellationToken;
