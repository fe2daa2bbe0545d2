use serde::Serialize;
use skillsync_types::ScoredSkill;

/// Category assumed for skills that were saved without one
pub const DEFAULT_CATEGORY: &str = "Technical";

/// Band a progress score falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProgressTier {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ProgressTier {
    pub fn of(progress: u8) -> Self {
        match progress {
            80..=u8::MAX => ProgressTier::Expert,
            60..=79 => ProgressTier::Advanced,
            40..=59 => ProgressTier::Intermediate,
            _ => ProgressTier::Beginner,
        }
    }

    pub fn motivation(self) -> &'static str {
        match self {
            ProgressTier::Expert => "Expert Level!",
            ProgressTier::Advanced => "Almost There!",
            ProgressTier::Intermediate => "Good Progress!",
            ProgressTier::Beginner => "Keep Going!",
        }
    }
}

/// Points left before a skill counts as mastered
pub fn remaining(progress: u8) -> u8 {
    100u8.saturating_sub(progress)
}

/// Per-tier counts and category breakdown of a scored skill list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillsOverview {
    pub expert: usize,
    pub advanced: usize,
    pub intermediate: usize,
    pub beginner: usize,
    /// `(category, count)` in order of first appearance
    pub categories: Vec<(String, usize)>,
}

impl SkillsOverview {
    pub fn from_scored(skills: &[ScoredSkill]) -> Self {
        let mut overview = Self::default();

        for skill in skills {
            match ProgressTier::of(skill.progress) {
                ProgressTier::Expert => overview.expert += 1,
                ProgressTier::Advanced => overview.advanced += 1,
                ProgressTier::Intermediate => overview.intermediate += 1,
                ProgressTier::Beginner => overview.beginner += 1,
            }

            let category = skill.category.as_deref().unwrap_or(DEFAULT_CATEGORY);
            match overview.categories.iter_mut().find(|(name, _)| name == category) {
                Some((_, count)) => *count += 1,
                None => overview.categories.push((category.to_string(), 1)),
            }
        }

        overview
    }

    pub fn total(&self) -> usize {
        self.expert + self.advanced + self.intermediate + self.beginner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(name: &str, progress: u8, category: Option<&str>) -> ScoredSkill {
        ScoredSkill {
            name: name.into(),
            level: "Beginner".into(),
            progress,
            category: category.map(Into::into),
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ProgressTier::of(100), ProgressTier::Expert);
        assert_eq!(ProgressTier::of(80), ProgressTier::Expert);
        assert_eq!(ProgressTier::of(79), ProgressTier::Advanced);
        assert_eq!(ProgressTier::of(60), ProgressTier::Advanced);
        assert_eq!(ProgressTier::of(59), ProgressTier::Intermediate);
        assert_eq!(ProgressTier::of(40), ProgressTier::Intermediate);
        assert_eq!(ProgressTier::of(39), ProgressTier::Beginner);
        assert_eq!(ProgressTier::of(0).motivation(), "Keep Going!");
    }

    #[test]
    fn test_remaining() {
        assert_eq!(remaining(65), 35);
        assert_eq!(remaining(100), 0);
    }

    #[test]
    fn test_overview() {
        let overview = SkillsOverview::from_scored(&[
            scored("Rust", 95, None),
            scored("Figma", 45, Some("Design")),
            scored("SQL", 62, Some("Technical")),
            scored("Hiring", 20, Some("HR")),
            scored("Sketch", 81, Some("Design")),
        ]);

        assert_eq!(overview.expert, 2);
        assert_eq!(overview.advanced, 1);
        assert_eq!(overview.intermediate, 1);
        assert_eq!(overview.beginner, 1);
        assert_eq!(overview.total(), 5);
        assert_eq!(
            overview.categories,
            vec![
                ("Technical".to_string(), 2),
                ("Design".to_string(), 2),
                ("HR".to_string(), 1),
            ]
        );
    }
}
