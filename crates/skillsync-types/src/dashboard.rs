use crate::lenient::{lossy_list, or_default, string_or_empty, string_or_none, timestamp_or_none};
use crate::{ConnectionState, LinkedInAnalysis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Connection between the viewer and one colleague, embedded in the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    #[serde(default, deserialize_with = "or_default")]
    pub status: ConnectionState,
    #[serde(rename = "isRequester", default, deserialize_with = "or_default")]
    pub is_requester: bool,
    #[serde(rename = "connectionId", default, deserialize_with = "string_or_none")]
    pub connection_id: Option<String>,
}

/// What the viewer can do about a colleague
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionAction {
    /// Already connected, nothing to offer
    Connected,
    /// No live connection: a request can be sent
    Connect,
    /// The viewer's own request is pending
    AwaitingResponse,
    /// The colleague asked to connect and the viewer can accept or reject
    Respond { connection_id: Option<String> },
}

/// A colleague entry in `all_users`
///
/// Fields are read leniently so one malformed colleague never drops the
/// aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Colleague {
    #[serde(rename = "_id", default, deserialize_with = "string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub department: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<String>,
    /// Absent when no connection record exists in either direction
    #[serde(
        rename = "connectionStatus",
        default,
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub connection_status: Option<ConnectionStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Colleague {
    pub fn is_connected(&self) -> bool {
        matches!(
            &self.connection_status,
            Some(ConnectionStatus { status: ConnectionState::Accepted, .. })
        )
    }

    pub fn connection_action(&self) -> ConnectionAction {
        let Some(status) = &self.connection_status else {
            return ConnectionAction::Connect;
        };
        match status.status {
            ConnectionState::Accepted => ConnectionAction::Connected,
            ConnectionState::Pending if status.is_requester => ConnectionAction::AwaitingResponse,
            ConnectionState::Pending => ConnectionAction::Respond {
                connection_id: status.connection_id.clone(),
            },
            ConnectionState::Rejected | ConnectionState::Unknown => ConnectionAction::Connect,
        }
    }
}

/// Most recent career inspiration stored for the viewer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestInspiration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_user_id: Option<Value>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub analysis_text: Option<String>,
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "timestamp_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Server-computed dashboard aggregate for one user
///
/// Treated as opaque: parts that do not fit their expected shape read as
/// absent, and unknown fields pass through in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    #[serde(default, deserialize_with = "lossy_list")]
    pub all_users: Vec<Colleague>,
    #[serde(
        default,
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub latest_inspiration: Option<LatestInspiration>,
    #[serde(
        default,
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub latest_linkedin_recommendation: Option<LinkedInAnalysis>,
    #[serde(
        default,
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_users: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DashboardSnapshot {
    pub fn colleague(&self, id: &str) -> Option<&Colleague> {
        self.all_users.iter().find(|c| c.id == id)
    }

    pub fn connected_colleagues(&self) -> impl Iterator<Item = &Colleague> {
        self.all_users.iter().filter(|c| c.is_connected())
    }

    pub fn other_colleagues(&self) -> impl Iterator<Item = &Colleague> {
        self.all_users.iter().filter(|c| !c.is_connected())
    }

    pub fn accepted_count(&self) -> usize {
        self.connected_colleagues().count()
    }

    /// Requests other colleagues sent to the viewer that are still pending
    pub fn pending_received_count(&self) -> usize {
        self.all_users
            .iter()
            .filter(|c| matches!(c.connection_action(), ConnectionAction::Respond { .. }))
            .count()
    }

    pub fn has_inspiration(&self) -> bool {
        self.latest_inspiration.is_some()
    }
}
