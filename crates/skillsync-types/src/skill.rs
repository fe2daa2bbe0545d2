use crate::lenient::{number_or_zero, string_or_empty, string_or_none};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Level reported for a skill whose proficiency is missing or empty
pub const DEFAULT_LEVEL: &str = "Beginner";

/// Raw skill record as stored by the backend
///
/// Every field is read leniently: a record with a missing or malformed field
/// still deserializes, so one bad entry never drops the rest of a list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
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
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub proficiency: Option<String>,
    #[serde(
        rename = "yearsOfExperience",
        default,
        deserialize_with = "number_or_zero"
    )]
    pub years_of_experience: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Skill {
    pub fn new(name: impl Into<String>, proficiency: impl Into<String>, years: f64) -> Self {
        Self {
            name: name.into(),
            proficiency: Some(proficiency.into()),
            years_of_experience: years,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Read a skill out of an arbitrary JSON value.
    ///
    /// Non-object values become an empty record instead of an error.
    pub fn from_value_lossy(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Level shown next to the skill: the raw proficiency, or `Beginner`
    pub fn display_level(&self) -> &str {
        match self.proficiency.as_deref() {
            Some(level) if !level.is_empty() => level,
            _ => DEFAULT_LEVEL,
        }
    }
}

/// Body for `POST /skills` and `PUT /skills/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSkill {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub proficiency: String,
    #[serde(rename = "yearsOfExperience")]
    pub years_of_experience: f64,
}

/// A skill with its preparedness score, ready for progress displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSkill {
    pub name: String,
    pub level: String,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_skill_wire_names() {
        let skill: Skill = serde_json::from_value(json!({
            "_id": "s1",
            "name": "Rust",
            "category": "Technical",
            "proficiency": "Advanced",
            "yearsOfExperience": 3,
            "endorsements": 2
        }))
        .unwrap();

        assert_eq!(skill.id.as_deref(), Some("s1"));
        assert_eq!(skill.years_of_experience, 3.0);
        assert_eq!(skill.extra.get("endorsements"), Some(&json!(2)));
    }

    #[test]
    fn test_malformed_fields_fall_back() {
        let skill: Skill = serde_json::from_value(json!({
            "name": 42,
            "proficiency": null,
            "yearsOfExperience": "four"
        }))
        .unwrap();

        assert_eq!(skill.name, "");
        assert_eq!(skill.proficiency, None);
        assert_eq!(skill.years_of_experience, 0.0);
    }

    #[test]
    fn test_numeric_string_years() {
        let skill: Skill = serde_json::from_value(json!({ "yearsOfExperience": " 2.5 " })).unwrap();
        assert_eq!(skill.years_of_experience, 2.5);
    }

    #[test]
    fn test_non_object_is_empty_record() {
        assert_eq!(Skill::from_value_lossy(json!("rust")), Skill::default());
    }

    #[test]
    fn test_display_level_defaults_to_beginner() {
        let mut skill = Skill::new("Go", "", 1.0);
        assert_eq!(skill.display_level(), "Beginner");

        skill.proficiency = None;
        assert_eq!(skill.display_level(), "Beginner");

        skill.proficiency = Some("expert".into());
        assert_eq!(skill.display_level(), "expert");
    }
}
