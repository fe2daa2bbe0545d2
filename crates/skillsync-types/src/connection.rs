use crate::lenient::{lossy_list, or_default, string_or_empty, string_or_none, timestamp_or_none};
use crate::UserProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message attached to connection requests sent from the dashboard
pub const DEFAULT_CONNECTION_MESSAGE: &str = "Hi! I'd like to connect with you on SkillSync.";

/// Lifecycle state of a connection record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Pending,
    Accepted,
    Rejected,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Answer to a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RespondStatus {
    Accepted,
    Rejected,
}

impl fmt::Display for RespondStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RespondStatus::Accepted => write!(f, "accepted"),
            RespondStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Body of `POST /users/{id}/connect`
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionRequest {
    pub message: String,
    pub connection_type: String,
}

impl Default for ConnectionRequest {
    fn default() -> Self {
        Self {
            message: DEFAULT_CONNECTION_MESSAGE.to_string(),
            connection_type: "general".to_string(),
        }
    }
}

/// Body of `PATCH /users/connections/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct RespondToConnection {
    pub status: RespondStatus,
}

/// A connection between two users, as listed by `GET /users/connections`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionRecord {
    #[serde(rename = "_id", default, deserialize_with = "string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "or_default")]
    pub requester: UserProfile,
    #[serde(default, deserialize_with = "or_default")]
    pub recipient: UserProfile,
    #[serde(default, deserialize_with = "or_default")]
    pub status: ConnectionState,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub connection_type: Option<String>,
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "timestamp_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "updatedAt",
        default,
        deserialize_with = "timestamp_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The viewer's requests and established connections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionsOverview {
    #[serde(default, deserialize_with = "string_or_none")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lossy_list")]
    pub received_requests: Vec<ConnectionRecord>,
    #[serde(default, deserialize_with = "lossy_list")]
    pub sent_requests: Vec<ConnectionRecord>,
    #[serde(default, deserialize_with = "lossy_list")]
    pub connections: Vec<ConnectionRecord>,
}

/// Counters shown above the connections list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionStats {
    pub total_connections: usize,
    pub pending_received: usize,
    pub pending_sent: usize,
    /// Percentage of sent requests that were accepted
    pub acceptance_rate: u8,
}

impl ConnectionsOverview {
    /// Received requests still awaiting an answer
    pub fn pending_received(&self) -> impl Iterator<Item = &ConnectionRecord> {
        self.received_requests
            .iter()
            .filter(|r| r.status == ConnectionState::Pending)
    }

    /// The person on the other side of an established connection
    pub fn other_party<'a>(&self, record: &'a ConnectionRecord) -> &'a UserProfile {
        match (&self.user_id, &record.requester.id) {
            (Some(me), Some(requester)) if me == requester => &record.recipient,
            _ => &record.requester,
        }
    }

    pub fn stats(&self) -> ConnectionStats {
        let total_sent = self.sent_requests.len();
        let accepted = self
            .sent_requests
            .iter()
            .filter(|r| r.status == ConnectionState::Accepted)
            .count();
        let acceptance_rate = if total_sent > 0 {
            ((accepted as f64 / total_sent as f64) * 100.0).round() as u8
        } else {
            0
        };

        ConnectionStats {
            total_connections: self.connections.len(),
            pending_received: self.pending_received().count(),
            pending_sent: self
                .sent_requests
                .iter()
                .filter(|r| r.status == ConnectionState::Pending)
                .count(),
            acceptance_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, requester: &str, recipient: &str, status: &str) -> serde_json::Value {
        json!({
            "_id": id,
            "requester": { "_id": requester, "name": requester },
            "recipient": { "_id": recipient, "name": recipient },
            "status": status,
            "createdAt": "2024-05-01T09:30:00.000Z"
        })
    }

    fn overview() -> ConnectionsOverview {
        serde_json::from_value(json!({
            "user_id": "me",
            "received_requests": [
                record("r1", "ann", "me", "pending"),
                record("r2", "bob", "me", "accepted")
            ],
            "sent_requests": [
                record("s1", "me", "cat", "accepted"),
                record("s2", "me", "dan", "pending"),
                record("s3", "me", "eve", "rejected")
            ],
            "connections": [
                record("r2", "bob", "me", "accepted"),
                record("s1", "me", "cat", "accepted")
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_stats() {
        assert_eq!(
            overview().stats(),
            ConnectionStats {
                total_connections: 2,
                pending_received: 1,
                pending_sent: 1,
                acceptance_rate: 33,
            }
        );
    }

    #[test]
    fn test_acceptance_rate_without_sent_requests() {
        assert_eq!(ConnectionsOverview::default().stats().acceptance_rate, 0);
    }

    #[test]
    fn test_other_party() {
        let overview = overview();
        let names: Vec<_> = overview
            .connections
            .iter()
            .map(|c| overview.other_party(c).name.as_str())
            .collect();
        assert_eq!(names, vec!["bob", "cat"]);
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let parsed: ConnectionRecord =
            serde_json::from_value(record("x", "a", "b", "blocked")).unwrap();
        assert_eq!(parsed.status, ConnectionState::Unknown);
    }

    #[test]
    fn test_partial_records_keep_overview() {
        let overview: ConnectionsOverview = serde_json::from_value(json!({
            "user_id": "me",
            "received_requests": [
                { "_id": "r1", "requester": { "_id": "ann", "name": null }, "status": "pending",
                  "createdAt": "last week" },
                { "_id": "r2", "requester": null, "recipient": "me" },
                42
            ],
            "sent_requests": null,
            "connections": [record("c1", "me", "cat", "accepted")]
        }))
        .unwrap();

        assert_eq!(overview.received_requests.len(), 2);
        assert!(overview.received_requests[0].created_at.is_none());
        assert_eq!(overview.received_requests[1].status, ConnectionState::Unknown);
        assert_eq!(overview.received_requests[1].requester, UserProfile::default());
        assert!(overview.sent_requests.is_empty());
        assert_eq!(overview.stats().pending_received, 1);
        assert_eq!(overview.other_party(&overview.connections[0]).name, "cat");
    }

    #[test]
    fn test_default_request_body() {
        assert_eq!(
            serde_json::to_value(ConnectionRequest::default()).unwrap(),
            json!({ "message": DEFAULT_CONNECTION_MESSAGE, "connection_type": "general" })
        );
    }
}
