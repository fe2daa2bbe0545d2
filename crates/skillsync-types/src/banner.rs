use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Daily motivational banner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Banner {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hot_topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Response of `GET /banners/today`; the banner may not exist yet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BannerEnvelope {
    #[serde(default)]
    pub banner: Option<Banner>,
}
