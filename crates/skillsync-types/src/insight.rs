//! Payloads of the AI-backed endpoints.
//!
//! The generation happens server-side; these types only carry what the
//! client reads back. Free-form parts stay as [`serde_json::Value`].

use crate::lenient::{lossy_list, or_default, string_or_empty, string_or_none, timestamp_or_none};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Colleague a career inspiration was drawn from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InspirationSource {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `POST /users/{id}/get-inspiration`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerInspiration {
    #[serde(default, deserialize_with = "or_default")]
    pub inspiration_source: InspirationSource,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `POST /users/analyze-linkedin`, also embedded in the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedInAnalysis {
    #[serde(default)]
    pub recommendations: Value,
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
}

/// Response of `POST /matches/ai-enhanced`
///
/// `success == false` means the backend fell back to non-AI suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiRecommendations {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub ai_recommendations: Value,
}

/// Response of `GET /matches/ai-status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiServiceStatus {
    pub ai_service_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AiServiceStatus {
    pub fn offline(error: impl Into<String>) -> Self {
        Self {
            ai_service_status: "offline".to_string(),
            error: Some(error.into()),
        }
    }

    pub fn is_online(&self) -> bool {
        !self.ai_service_status.eq_ignore_ascii_case("offline")
    }
}

/// Body of `POST /users/compare-skills`
#[derive(Debug, Clone, Serialize)]
pub struct CompareRequest {
    #[serde(rename = "compareTo")]
    pub compare_to: String,
}

/// One line of a skill comparison
///
/// The backend fills different fields depending on the bucket: `advantage`
/// for strengths, `delta`/`suggestion` for gaps, `level` for flex-worthy
/// skills.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonItem {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub skill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advantage: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_delta: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<Value>,
    #[serde(
        default,
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub my_progress: Option<f64>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub level: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub reason: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub comment: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub suggestion: Option<String>,
}

/// Response of `POST /users/compare-skills`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillComparison {
    #[serde(rename = "strongerIn", default, deserialize_with = "lossy_list")]
    pub stronger_in: Vec<ComparisonItem>,
    #[serde(rename = "weakerIn", default, deserialize_with = "lossy_list")]
    pub weaker_in: Vec<ComparisonItem>,
    #[serde(rename = "flexWorthy", default, deserialize_with = "lossy_list")]
    pub flex_worthy: Vec<ComparisonItem>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comparison_wire_names() {
        let comparison: SkillComparison = serde_json::from_value(json!({
            "strongerIn": [{ "skill": "Rust", "advantage": "+20%", "reason": "shipped the parser" }],
            "weakerIn": [{ "skill": "SQL", "delta": "-15%", "suggestion": "pair on queries" }],
            "flexWorthy": [{ "skill": "Rust", "level": "Expert" }],
            "summary": "Strong systems profile"
        }))
        .unwrap();

        assert_eq!(comparison.stronger_in[0].skill, "Rust");
        assert_eq!(comparison.weaker_in[0].suggestion.as_deref(), Some("pair on queries"));
        assert_eq!(comparison.flex_worthy[0].level.as_deref(), Some("Expert"));
    }

    #[test]
    fn test_incomplete_items_keep_comparison() {
        let comparison: SkillComparison = serde_json::from_value(json!({
            "strongerIn": [{ "advantage": "+20%" }, { "skill": "Rust", "my_progress": "high" }],
            "weakerIn": "none",
            "summary": null
        }))
        .unwrap();

        assert_eq!(comparison.stronger_in.len(), 2);
        assert_eq!(comparison.stronger_in[0].skill, "");
        assert_eq!(comparison.stronger_in[1].my_progress, None);
        assert!(comparison.weaker_in.is_empty());
        assert_eq!(comparison.summary, "");
    }

    #[test]
    fn test_inspiration_without_source() {
        let inspiration: CareerInspiration =
            serde_json::from_value(json!({ "inspiration_source": null, "tips": ["shadow"] })).unwrap();
        assert_eq!(inspiration.inspiration_source.name, "");
        assert_eq!(inspiration.extra.get("tips"), Some(&json!(["shadow"])));
    }

    #[test]
    fn test_offline_status() {
        let status = AiServiceStatus::offline("connection refused");
        assert!(!status.is_online());
        assert_eq!(status.error.as_deref(), Some("connection refused"));

        let online: AiServiceStatus =
            serde_json::from_value(json!({ "ai_service_status": "online" })).unwrap();
        assert!(online.is_online());
    }
}
