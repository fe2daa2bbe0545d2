//! Errors returned by dashboard actions

use crate::busy::Control;
use skillsync_client::ApiError;
use thiserror::Error;

/// Why a dashboard action did not complete
///
/// Every variant except [`ActionError::Busy`] and [`ActionError::Cancelled`]
/// has already been surfaced as an error notice by the time it is returned.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("connection id missing")]
    MissingConnectionId,

    #[error("no colleague selected for comparison")]
    MissingSelection,

    #[error("{0} is already in progress")]
    Busy(Control),

    #[error("dashboard sync has been shut down")]
    Cancelled,
}

impl ActionError {
    /// The backend error behind this failure, if any
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            ActionError::Api(e) => Some(e),
            _ => None,
        }
    }
}
