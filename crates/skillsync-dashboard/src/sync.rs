//! Dashboard synchronization flow
//!
//! [`DashboardSync`] owns the dashboard state and runs every action against
//! it. Reads fan out and tolerate partial failure. Mutations are guarded per
//! control, refresh the whole view once on success and only then post their
//! success notice.

use crate::busy::{BusyGuard, BusySet, Control};
use crate::error::ActionError;
use crate::notice::{Notice, LONG_NOTICE, SHORT_NOTICE};
use crate::state::{DashboardState, DashboardView, FetchFailure, FetchSource, RefreshOutcome};
use skillsync_client::{ApiError, DashboardBackend};
use skillsync_types::{
    CareerInspiration, ConnectionRequest, FlexRequest, LinkedInAnalysis, RespondStatus,
    SkillComparison,
};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

// ============================================================================
// Messages
// ============================================================================

const SEND_CONNECTION_FAILED: &str = "Failed to send connection request. Please try again.";
const RESPOND_FAILED: &str = "Failed to respond to connection request.";
const MISSING_CONNECTION_ID: &str = "Connection ID not found - please refresh the page";
const INSPIRATION_FAILED: &str = "Failed to generate career inspiration. Please try again.";
const LINKEDIN_RUNNING: &str = "Analyzing your LinkedIn profile...";
const LINKEDIN_DONE: &str = "LinkedIn analysis complete!";
const LINKEDIN_FAILED: &str = "Failed to analyze LinkedIn profile.";
const FLEX_FAILED: &str = "Failed to flex skill.";
const MISSING_SELECTION: &str = "Please select someone to compare with.";
const COMPARE_FAILED: &str = "Failed to compare.";
const BANNER_LOAD_FAILED: &str = "Failed to load today's banner";
const BANNER_GENERATE_FAILED: &str = "Failed to generate new banner";

// ============================================================================
// DashboardSync
// ============================================================================

/// State holder and action runner for one dashboard session
pub struct DashboardSync<A> {
    api: A,
    state: RwLock<DashboardState>,
    busy: BusySet,
    cancel: CancellationToken,
    refreshes: AtomicU64,
}

impl<A: DashboardBackend> DashboardSync<A> {
    pub fn new(api: A) -> Self {
        Self::with_cancellation(api, CancellationToken::new())
    }

    /// Share a cancellation token with the caller, e.g. one tripped on Ctrl+C
    pub fn with_cancellation(api: A, cancel: CancellationToken) -> Self {
        Self {
            api,
            state: RwLock::new(DashboardState::default()),
            busy: BusySet::default(),
            cancel,
            refreshes: AtomicU64::new(0),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Stop all in-flight and future state writes
    pub fn shutdown(&self) {
        info!("Shutting down dashboard sync");
        self.cancel.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Number of refreshes started so far
    pub fn refresh_count(&self) -> u64 {
        self.refreshes.load(Ordering::SeqCst)
    }

    pub fn is_busy(&self, control: &Control) -> bool {
        self.busy.contains(control)
    }

    /// Snapshot of the current state, without an expired notice
    pub async fn view(&self) -> DashboardState {
        let mut state = self.state.read().await.clone();
        state.notice = state.notice.filter(|n| !n.is_expired());
        state
    }

    /// Current notice, if one is set and not expired
    pub async fn notice(&self) -> Option<Notice> {
        self.state
            .read()
            .await
            .notice
            .clone()
            .filter(|n| !n.is_expired())
    }

    pub async fn dismiss_notice(&self) {
        self.state.write().await.notice = None;
    }

    // ---- reads ----

    /// Fetch the dashboard aggregate and the skills list together
    ///
    /// Either fetch may fail without affecting the other. The refreshed view
    /// replaces the stored one.
    pub async fn refresh(&self) -> RefreshOutcome {
        if self.cancel.is_cancelled() {
            return RefreshOutcome::Cancelled;
        }

        let n = self.refreshes.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(refresh = n, "Refreshing dashboard");

        let view = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                info!(refresh = n, "Refresh cancelled");
                return RefreshOutcome::Cancelled;
            }
            view = self.fetch_view() => view,
        };

        let mut state = self.state.write().await;
        if self.cancel.is_cancelled() {
            return RefreshOutcome::Cancelled;
        }
        state.dashboard = view.dashboard.clone();
        state.skills = view.skills.clone();
        drop(state);

        info!(
            refresh = n,
            skills = view.skills.len(),
            failures = view.failures.len(),
            "Dashboard refreshed"
        );
        RefreshOutcome::Completed(view)
    }

    async fn fetch_view(&self) -> DashboardView {
        let (dashboard, skills) = tokio::join!(self.api.dashboard_data(), self.api.skills_payload());

        let mut failures = Vec::new();
        let dashboard = match dashboard {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Dashboard fetch failed: {}", e);
                failures.push(FetchFailure {
                    source: FetchSource::Dashboard,
                    message: e.to_string(),
                });
                None
            }
        };
        let skills = match skills {
            Ok(payload) => payload.into_scored(),
            Err(e) => {
                warn!("Skills fetch failed: {}", e);
                failures.push(FetchFailure {
                    source: FetchSource::Skills,
                    message: e.to_string(),
                });
                Vec::new()
            }
        };

        DashboardView {
            dashboard,
            skills,
            failures,
        }
    }

    /// Reload today's flex wall, keeping the current feed when that fails
    pub async fn refresh_flex_wall(&self) -> Result<usize, ActionError> {
        let entries = match self.api.flex_wall_today().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Flex wall fetch failed, keeping previous feed: {}", e);
                return Err(e.into());
            }
        };

        let count = entries.len();
        self.write_state(|state| state.flex_wall = entries).await?;
        Ok(count)
    }

    /// Load today's banner
    pub async fn refresh_banner(&self) -> Result<(), ActionError> {
        match self.api.banner_today().await {
            Ok(envelope) => {
                self.write_state(|state| {
                    state.banner = envelope.banner;
                    if state.notice.as_ref().is_some_and(Notice::is_error) {
                        state.notice = None;
                    }
                })
                .await
            }
            Err(e) => {
                error!("Failed to load banner: {}", e);
                self.set_notice(Notice::error(BANNER_LOAD_FAILED)).await;
                Err(e.into())
            }
        }
    }

    /// Compare the viewer's skills with a colleague's
    pub async fn compare_skills(&self, user_id: Option<&str>) -> Result<SkillComparison, ActionError> {
        let Some(user_id) = user_id.filter(|id| !id.is_empty()) else {
            self.set_notice(Notice::error(MISSING_SELECTION)).await;
            return Err(ActionError::MissingSelection);
        };
        let _busy = self.begin(Control::Compare).await?;

        match self.api.compare_skills(user_id).await {
            Ok(comparison) => {
                let stored = comparison.clone();
                self.write_state(|state| state.comparison = Some(stored)).await?;
                Ok(comparison)
            }
            Err(e) => {
                error!(user_id, "Skill comparison failed: {}", e);
                self.set_notice(Notice::error(COMPARE_FAILED)).await;
                Err(e.into())
            }
        }
    }

    // ---- mutations ----

    /// Ask a colleague to connect
    pub async fn send_connection(&self, user_id: &str, name: &str) -> Result<(), ActionError> {
        let _busy = self.begin(Control::Connect(user_id.to_string())).await?;
        let request = ConnectionRequest::default();

        self.mutate(
            "send connection",
            SEND_CONNECTION_FAILED,
            self.api.send_connection(user_id, &request),
        )
        .await?;

        self.refresh().await;
        self.set_notice(Notice::success(
            format!("Connection request sent to {name}!"),
            SHORT_NOTICE,
        ))
        .await;
        Ok(())
    }

    /// Accept or reject a pending request
    ///
    /// A missing id is reported to the user without calling the backend.
    pub async fn respond_to_connection(
        &self,
        connection_id: Option<&str>,
        status: RespondStatus,
        name: &str,
    ) -> Result<(), ActionError> {
        let Some(connection_id) = connection_id.filter(|id| !id.is_empty()) else {
            warn!(name, "Respond attempted without a connection id");
            self.set_notice(Notice::error(MISSING_CONNECTION_ID)).await;
            return Err(ActionError::MissingConnectionId);
        };
        let _busy = self.begin(Control::Respond(connection_id.to_string())).await?;

        self.mutate(
            "respond to connection",
            RESPOND_FAILED,
            self.api.respond_to_connection(connection_id, status),
        )
        .await?;

        self.refresh().await;
        self.set_notice(Notice::success(
            format!("Connection {status} for {name}!"),
            SHORT_NOTICE,
        ))
        .await;
        Ok(())
    }

    /// Generate career inspiration from a connected colleague
    pub async fn get_inspiration(&self, user_id: &str) -> Result<CareerInspiration, ActionError> {
        let _busy = self.begin(Control::Inspiration(user_id.to_string())).await?;

        let inspiration = self
            .mutate(
                "career inspiration",
                INSPIRATION_FAILED,
                self.api.career_inspiration(user_id),
            )
            .await?;

        self.refresh().await;
        self.set_notice(Notice::success(
            format!(
                "Career inspiration generated from {}!",
                inspiration.inspiration_source.name
            ),
            LONG_NOTICE,
        ))
        .await;
        Ok(inspiration)
    }

    /// Run the LinkedIn profile analysis
    pub async fn analyze_linkedin(&self) -> Result<LinkedInAnalysis, ActionError> {
        let _busy = self.begin(Control::LinkedInAnalysis).await?;
        self.set_notice(Notice::info(LINKEDIN_RUNNING)).await;

        let analysis = self
            .mutate("analyze linkedin", LINKEDIN_FAILED, self.api.analyze_linkedin())
            .await?;

        self.refresh().await;
        self.set_notice(Notice::success(LINKEDIN_DONE, SHORT_NOTICE)).await;
        Ok(analysis)
    }

    /// Post a flex to the shared wall
    pub async fn flex_skill(&self, flex: FlexRequest) -> Result<(), ActionError> {
        let _busy = self.begin(Control::Flex).await?;

        self.mutate("flex skill", FLEX_FAILED, self.api.flex_skill(&flex))
            .await?;

        self.refresh().await;
        // On failure the wall keeps its previous feed
        let _ = self.refresh_flex_wall().await;
        self.set_notice(Notice::success(
            format!("You flexed {}!", flex.skill),
            SHORT_NOTICE,
        ))
        .await;
        Ok(())
    }

    /// Ask the backend for a fresh banner, then reload today's
    pub async fn generate_banner(&self) -> Result<(), ActionError> {
        let _busy = self.begin(Control::GenerateBanner).await?;

        if let Err(e) = self.api.generate_banner().await {
            error!("Banner generation failed: {}", e);
            self.set_notice(Notice::error(BANNER_GENERATE_FAILED)).await;
            return Err(e.into());
        }

        match self.api.banner_today().await {
            Ok(envelope) => {
                self.write_state(|state| state.banner = envelope.banner).await
            }
            Err(e) => {
                error!("Failed to reload banner after generation: {}", e);
                self.set_notice(Notice::error(BANNER_LOAD_FAILED)).await;
                Err(e.into())
            }
        }
    }

    // ---- helpers ----

    /// Claim `control` and clear a lingering error notice
    async fn begin(&self, control: Control) -> Result<BusyGuard<'_>, ActionError> {
        if self.cancel.is_cancelled() {
            return Err(ActionError::Cancelled);
        }
        let Some(guard) = self.busy.try_acquire(control.clone()) else {
            debug!(%control, "Rejecting duplicate submission");
            return Err(ActionError::Busy(control));
        };
        self.write_state(|state| {
            if state.notice.as_ref().is_some_and(Notice::is_error) {
                state.notice = None;
            }
        })
        .await?;
        Ok(guard)
    }

    /// Await a backend mutation, turning failure into an error notice
    async fn mutate<T>(
        &self,
        operation: &'static str,
        fallback: &str,
        call: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ActionError> {
        match call.await {
            Ok(value) => {
                info!(operation, "Mutation succeeded");
                Ok(value)
            }
            Err(e) => {
                error!(operation, "Mutation failed: {}", e);
                self.set_notice(Notice::error(e.user_message(fallback))).await;
                Err(e.into())
            }
        }
    }

    async fn set_notice(&self, notice: Notice) {
        let _ = self.write_state(|state| state.notice = Some(notice)).await;
    }

    /// Apply `update` unless the flow has been shut down
    async fn write_state(&self, update: impl FnOnce(&mut DashboardState)) -> Result<(), ActionError> {
        let mut state = self.state.write().await;
        if self.cancel.is_cancelled() {
            return Err(ActionError::Cancelled);
        }
        update(&mut state);
        Ok(())
    }
}
