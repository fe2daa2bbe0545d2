//! SkillSync Types - Core types for the SkillSync client
//!
//! This module defines the wire and domain types exchanged with the SkillSync
//! backend: skills, users, the dashboard aggregate, connections, AI payloads,
//! banners and the flex wall.

mod banner;
mod connection;
mod dashboard;
mod flex;
mod insight;
mod lenient;
mod skill;
mod user;

pub use banner::{Banner, BannerEnvelope};
pub use connection::{
    ConnectionRecord, ConnectionRequest, ConnectionState, ConnectionStats, ConnectionsOverview,
    RespondStatus, RespondToConnection, DEFAULT_CONNECTION_MESSAGE,
};
pub use dashboard::{Colleague, ConnectionAction, ConnectionStatus, DashboardSnapshot, LatestInspiration};
pub use flex::{FlexEntry, FlexRequest};
pub use insight::{
    AiRecommendations, AiServiceStatus, CareerInspiration, CompareRequest, ComparisonItem,
    InspirationSource, LinkedInAnalysis, SkillComparison,
};
pub use skill::{NewSkill, ScoredSkill, Skill, DEFAULT_LEVEL};
pub use user::{AuthResponse, Credentials, ProfileUpdate, Registration, UserProfile};
