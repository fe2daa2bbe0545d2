//! The skills endpoint has answered with a bare list and with a `{ data: [...] }`
//! envelope over time. [`SkillsPayload`] names the accepted shapes once so callers
//! never inspect JSON themselves.

use serde_json::Value;
use skillsync_types::{ScoredSkill, Skill};

/// Shape of a `GET /skills` response
#[derive(Debug, Clone, PartialEq)]
pub enum SkillsPayload {
    /// `[ {...}, ... ]`
    List(Vec<Skill>),
    /// `{ "data": [ {...}, ... ] }`
    Envelope(Vec<Skill>),
    /// Anything else, including `null`
    Unrecognized,
}

impl SkillsPayload {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => SkillsPayload::List(lossy_list(items)),
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(items)) => SkillsPayload::Envelope(lossy_list(items)),
                _ => SkillsPayload::Unrecognized,
            },
            _ => SkillsPayload::Unrecognized,
        }
    }

    pub fn into_skills(self) -> Vec<Skill> {
        match self {
            SkillsPayload::List(skills) | SkillsPayload::Envelope(skills) => skills,
            SkillsPayload::Unrecognized => Vec::new(),
        }
    }

    /// Normalize to the canonical scored list, preserving source order
    pub fn into_scored(self) -> Vec<ScoredSkill> {
        skillsync_scoring::score_all(&self.into_skills())
    }
}

fn lossy_list(items: Vec<Value>) -> Vec<Skill> {
    items.into_iter().map(Skill::from_value_lossy).collect()
}
