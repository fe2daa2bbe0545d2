use crate::lenient::{string_or_empty, string_or_none};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user as returned by the profile, search and connection endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
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
    pub bio: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<String>,
    #[serde(
        rename = "linkedinProfile",
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub linkedin_profile: Option<String>,
    #[serde(
        rename = "twitterProfile",
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub twitter_profile: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Name and role joined the way list entries show a person
    pub fn headline(&self) -> String {
        match (&self.role, &self.department) {
            (Some(role), Some(department)) => format!("{} • {} • {}", self.name, role, department),
            (Some(role), None) => format!("{} • {}", self.name, role),
            (None, Some(department)) => format!("{} • {}", self.name, department),
            (None, None) => self.name.clone(),
        }
    }
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Response of login and register: a bearer token plus the signed-in user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Partial profile edit for `PUT /users/me`; unset fields are left alone
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(rename = "linkedinProfile", skip_serializing_if = "Option::is_none")]
    pub linkedin_profile: Option<String>,
    #[serde(rename = "twitterProfile", skip_serializing_if = "Option::is_none")]
    pub twitter_profile: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.role.is_none()
            && self.department.is_none()
            && self.bio.is_none()
            && self.linkedin_profile.is_none()
            && self.twitter_profile.is_none()
    }
}
