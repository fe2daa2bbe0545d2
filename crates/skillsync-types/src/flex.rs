use crate::lenient::{or_default, string_or_empty, string_or_none};
use crate::UserProfile;
use serde::{Deserialize, Serialize};

/// A post on today's flex wall
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlexEntry {
    #[serde(rename = "_id", default, deserialize_with = "string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "or_default")]
    pub user: UserProfile,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub skill: String,
    #[serde(
        default,
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub progress: Option<f64>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub reason: Option<String>,
}

/// Body of `POST /flexwall/flex`
#[derive(Debug, Clone, Serialize)]
pub struct FlexRequest {
    pub skill: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_entries_keep_feed() {
        let entries: Vec<FlexEntry> = serde_json::from_value(json!([
            { "_id": "f1", "user": { "name": "Ada" }, "skill": "Rust", "progress": 80 },
            { "user": { "name": "Bo" }, "skill": "SQL", "progress": "lots" },
            { "_id": "f3", "user": null, "skill": null, "reason": 5 }
        ]))
        .unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].progress, Some(80.0));
        assert_eq!(entries[1].id, "");
        assert_eq!(entries[1].user.name, "Bo");
        assert_eq!(entries[1].progress, None);
        assert_eq!(entries[2].skill, "");
        assert_eq!(entries[2].reason, None);
    }
}
