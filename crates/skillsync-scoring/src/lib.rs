//! Preparedness scoring for skills
//!
//! A skill's readiness is its proficiency tier weight plus a capped bonus for
//! years of experience, clamped to `0..=100`. Scores are recomputed from the
//! raw `(proficiency, years)` pair on every fetch and never stored.

mod overview;

pub use overview::{remaining, ProgressTier, SkillsOverview, DEFAULT_CATEGORY};

use serde::Serialize;
use skillsync_types::{ScoredSkill, Skill};
use std::fmt;

/// Points granted per year of experience
const POINTS_PER_YEAR: f64 = 5.0;
/// Experience alone can never contribute more than this
const MAX_EXPERIENCE_BONUS: f64 = 30.0;
const MAX_SCORE: f64 = 100.0;

/// Self-reported proficiency tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    pub const ALL: [Proficiency; 4] = [
        Proficiency::Beginner,
        Proficiency::Intermediate,
        Proficiency::Advanced,
        Proficiency::Expert,
    ];

    /// Parse a tier name, ignoring case and surrounding whitespace
    pub fn parse(level: &str) -> Option<Self> {
        match level.trim().to_lowercase().as_str() {
            "beginner" => Some(Proficiency::Beginner),
            "intermediate" => Some(Proficiency::Intermediate),
            "advanced" => Some(Proficiency::Advanced),
            "expert" => Some(Proficiency::Expert),
            _ => None,
        }
    }

    pub fn base_weight(self) -> u8 {
        match self {
            Proficiency::Beginner => 20,
            Proficiency::Intermediate => 40,
            Proficiency::Advanced => 70,
            Proficiency::Expert => 90,
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Proficiency::Beginner => "Beginner",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Advanced => "Advanced",
            Proficiency::Expert => "Expert",
        };
        f.write_str(name)
    }
}

/// Preparedness score of a skill, in `0..=100`
///
/// Unknown levels weigh zero so the score is the experience bonus alone.
/// Negative and non-finite years count as zero.
pub fn score(level: &str, years: f64) -> u8 {
    let base = Proficiency::parse(level).map_or(0.0, |p| f64::from(p.base_weight()));
    let years = if years.is_finite() { years.max(0.0) } else { 0.0 };
    let bonus = (years * POINTS_PER_YEAR).min(MAX_EXPERIENCE_BONUS);

    // Always within 0..=100, so the cast cannot truncate
    (base + bonus).min(MAX_SCORE).round() as u8
}

/// Score one raw skill record
pub fn score_skill(skill: &Skill) -> ScoredSkill {
    ScoredSkill {
        name: skill.name.clone(),
        level: skill.display_level().to_string(),
        progress: score(
            skill.proficiency.as_deref().unwrap_or_default(),
            skill.years_of_experience,
        ),
        category: skill.category.clone(),
    }
}

/// Score a list of raw skills, keeping order and length
pub fn score_all(skills: &[Skill]) -> Vec<ScoredSkill> {
    skills.iter().map(score_skill).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_literal_scenarios() {
        assert_eq!(score("beginner", 0.0), 20);
        assert_eq!(score("intermediate", 2.0), 50);
        assert_eq!(score("advanced", 10.0), 100);
        assert_eq!(score("expert", 0.0), 90);
    }

    #[test]
    fn test_unknown_level_is_bonus_only() {
        assert_eq!(score("unknown", 0.0), 0);
        assert_eq!(score("unknown", 10.0), 30);
        assert_eq!(score("", 3.0), 15);
    }

    #[test]
    fn test_case_and_whitespace() {
        assert_eq!(score(" Expert ", 2.0), score("expert", 2.0));
        assert_eq!(score("\tINTERMEDIATE\n", 1.0), 45);
    }

    #[test]
    fn test_bonus_is_capped() {
        assert_eq!(score("beginner", 6.0), 50);
        assert_eq!(score("beginner", 40.0), 50);
        assert_eq!(score("expert", 1.0), 95);
        assert_eq!(score("expert", 3.0), 100);
    }

    #[test]
    fn test_fractional_years_round() {
        assert_eq!(score("beginner", 0.1), 21);
        assert_eq!(score("beginner", 0.05), 20);
    }

    #[test]
    fn test_negative_and_non_finite_years_clamp_to_zero() {
        assert_eq!(score("advanced", -4.0), 70);
        assert_eq!(score("advanced", f64::NAN), 70);
        assert_eq!(score("advanced", f64::INFINITY), 70);
    }

    #[test]
    fn test_score_skill_without_proficiency() {
        let skill = Skill {
            name: "Kotlin".into(),
            years_of_experience: 2.0,
            ..Skill::default()
        };
        let scored = score_skill(&skill);

        assert_eq!(scored.level, "Beginner");
        assert_eq!(scored.progress, 10);
    }

    #[test]
    fn test_score_all_keeps_order() {
        let skills = vec![
            Skill::new("Rust", "Expert", 4.0),
            Skill::new("SQL", "nonsense", 1.0),
            Skill::new("CSS", "beginner", 0.0).with_category("Design"),
        ];
        let scored = score_all(&skills);

        let names: Vec<_> = scored.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "SQL", "CSS"]);
        assert_eq!(scored.iter().map(|s| s.progress).collect::<Vec<_>>(), vec![100, 5, 20]);
        assert_eq!(scored[1].level, "nonsense");
        assert_eq!(scored[2].category.as_deref(), Some("Design"));
    }

    #[test]
    fn test_parse_and_display() {
        for tier in Proficiency::ALL {
            assert_eq!(Proficiency::parse(&tier.to_string()), Some(tier));
        }
        assert_eq!(Proficiency::parse("guru"), None);
    }

    fn level_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("beginner".to_string()),
            Just("Intermediate".to_string()),
            Just(" ADVANCED ".to_string()),
            Just("expert".to_string()),
            "[a-z]{0,10}",
        ]
    }

    proptest! {
        #[test]
        fn prop_score_is_bounded(level in level_strategy(), years in 0.0f64..=100.0) {
            let s = score(&level, years);
            prop_assert!(s <= 100);
        }

        #[test]
        fn prop_score_is_monotonic_in_years(
            level in level_strategy(),
            a in 0.0f64..=100.0,
            b in 0.0f64..=100.0,
        ) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(score(&level, low) <= score(&level, high));
        }

        #[test]
        fn prop_score_ignores_case_and_padding(
            tier in prop::sample::select(Proficiency::ALL.to_vec()),
            years in 0.0f64..=20.0,
            pad in "[ \t]{0,3}",
        ) {
            let canonical = tier.to_string().to_lowercase();
            let noisy = format!("{pad}{}{pad}", tier.to_string().to_uppercase());
            prop_assert_eq!(score(&noisy, years), score(&canonical, years));
        }

        #[test]
        fn prop_zero_years_is_base_weight(tier in prop::sample::select(Proficiency::ALL.to_vec())) {
            prop_assert_eq!(score(&tier.to_string(), 0.0), tier.base_weight());
        }
    }
}
