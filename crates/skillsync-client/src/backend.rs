//! The backend operations the dashboard flow depends on.
//!
//! [`SkillSyncClient`] is the production implementation; tests substitute an
//! in-memory backend.

use crate::client::SkillSyncClient;
use crate::error::Result;
use crate::payload::SkillsPayload;
use serde_json::Value;
use skillsync_types::{
    BannerEnvelope, CareerInspiration, ConnectionRequest, DashboardSnapshot, FlexEntry,
    FlexRequest, LinkedInAnalysis, RespondStatus, SkillComparison,
};
use std::future::Future;

/// Backend seam for dashboard reads and mutations
pub trait DashboardBackend: Send + Sync {
    fn dashboard_data(&self) -> impl Future<Output = Result<DashboardSnapshot>> + Send;

    fn skills_payload(&self) -> impl Future<Output = Result<SkillsPayload>> + Send;

    fn send_connection(
        &self,
        user_id: &str,
        request: &ConnectionRequest,
    ) -> impl Future<Output = Result<Value>> + Send;

    fn respond_to_connection(
        &self,
        connection_id: &str,
        status: RespondStatus,
    ) -> impl Future<Output = Result<Value>> + Send;

    fn career_inspiration(&self, user_id: &str) -> impl Future<Output = Result<CareerInspiration>> + Send;

    fn analyze_linkedin(&self) -> impl Future<Output = Result<LinkedInAnalysis>> + Send;

    fn flex_skill(&self, flex: &FlexRequest) -> impl Future<Output = Result<Value>> + Send;

    fn flex_wall_today(&self) -> impl Future<Output = Result<Vec<FlexEntry>>> + Send;

    fn compare_skills(&self, user_id: &str) -> impl Future<Output = Result<SkillComparison>> + Send;

    fn banner_today(&self) -> impl Future<Output = Result<BannerEnvelope>> + Send;

    fn generate_banner(&self) -> impl Future<Output = Result<Value>> + Send;
}

impl DashboardBackend for SkillSyncClient {
    async fn dashboard_data(&self) -> Result<DashboardSnapshot> {
        SkillSyncClient::dashboard_data(self).await
    }

    async fn skills_payload(&self) -> Result<SkillsPayload> {
        SkillSyncClient::skills_payload(self).await
    }

    async fn send_connection(&self, user_id: &str, request: &ConnectionRequest) -> Result<Value> {
        SkillSyncClient::send_connection(self, user_id, request).await
    }

    async fn respond_to_connection(&self, connection_id: &str, status: RespondStatus) -> Result<Value> {
        SkillSyncClient::respond_to_connection(self, connection_id, status).await
    }

    async fn career_inspiration(&self, user_id: &str) -> Result<CareerInspiration> {
        SkillSyncClient::career_inspiration(self, user_id).await
    }

    async fn analyze_linkedin(&self) -> Result<LinkedInAnalysis> {
        SkillSyncClient::analyze_linkedin(self).await
    }

    async fn flex_skill(&self, flex: &FlexRequest) -> Result<Value> {
        SkillSyncClient::flex_skill(self, flex).await
    }

    async fn flex_wall_today(&self) -> Result<Vec<FlexEntry>> {
        SkillSyncClient::flex_wall_today(self).await
    }

    async fn compare_skills(&self, user_id: &str) -> Result<SkillComparison> {
        SkillSyncClient::compare_skills(self, user_id).await
    }

    async fn banner_today(&self) -> Result<BannerEnvelope> {
        SkillSyncClient::banner_today(self).await
    }

    async fn generate_banner(&self) -> Result<Value> {
        SkillSyncClient::generate_banner(self).await
    }
}
