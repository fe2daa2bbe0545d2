//! What the dashboard currently shows

use crate::notice::Notice;
use serde::Serialize;
use skillsync_types::{Banner, DashboardSnapshot, FlexEntry, ScoredSkill, SkillComparison};
use std::fmt;

/// Everything the dashboard renders, as last written by the sync flow
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardState {
    pub dashboard: Option<DashboardSnapshot>,
    pub skills: Vec<ScoredSkill>,
    pub flex_wall: Vec<FlexEntry>,
    pub banner: Option<Banner>,
    pub comparison: Option<SkillComparison>,
    pub notice: Option<Notice>,
}

/// Which half of a refresh failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchSource {
    Dashboard,
    Skills,
}

impl fmt::Display for FetchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchSource::Dashboard => write!(f, "dashboard"),
            FetchSource::Skills => write!(f, "skills"),
        }
    }
}

/// A suppressed read failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub source: FetchSource,
    pub message: String,
}

/// Result of one refresh
///
/// A failed fetch leaves its half empty and adds an entry to `failures`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardView {
    pub dashboard: Option<DashboardSnapshot>,
    pub skills: Vec<ScoredSkill>,
    pub failures: Vec<FetchFailure>,
}

impl DashboardView {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, source: FetchSource) -> bool {
        self.failures.iter().any(|f| f.source == source)
    }
}

#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    Completed(DashboardView),
    /// Shutdown won the race; stored state was not touched
    Cancelled,
}

impl RefreshOutcome {
    pub fn view(&self) -> Option<&DashboardView> {
        match self {
            RefreshOutcome::Completed(view) => Some(view),
            RefreshOutcome::Cancelled => None,
        }
    }

    pub fn into_view(self) -> Option<DashboardView> {
        match self {
            RefreshOutcome::Completed(view) => Some(view),
            RefreshOutcome::Cancelled => None,
        }
    }
}
