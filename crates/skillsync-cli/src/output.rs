//! Plain and JSON rendering of command results

use anyhow::Result;
use serde::Serialize;
use skillsync_dashboard::{DashboardState, Notice, NoticeKind};
use skillsync_scoring::{remaining, ProgressTier, SkillsOverview};
use skillsync_types::{
    Banner, ConnectionAction, ConnectionsOverview, DashboardSnapshot, FlexEntry, ScoredSkill,
    SkillComparison, UserProfile,
};

/// Where command results go
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print `value` as pretty JSON, or the plain lines from `plain`
    pub fn emit<T: Serialize>(&self, value: &T, plain: impl FnOnce(&T) -> Vec<String>) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            for line in plain(value) {
                println!("{line}");
            }
        }
        Ok(())
    }

    /// Free-form backend payloads: JSON either way
    pub fn raw<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn notice(&self, notice: Option<&Notice>) {
        let Some(notice) = notice else {
            return;
        };
        match notice.kind {
            NoticeKind::Error => eprintln!("error: {}", notice.message),
            NoticeKind::Info | NoticeKind::Success if !self.json => println!("{}", notice.message),
            // Keep stdout parseable in JSON mode
            _ => eprintln!("{}", notice.message),
        }
    }
}

pub fn profile_lines(user: &UserProfile) -> Vec<String> {
    let mut lines = vec![user.headline()];
    if let Some(email) = &user.email {
        lines.push(format!("Email: {email}"));
    }
    if let Some(bio) = &user.bio {
        lines.push(format!("Bio: {bio}"));
    }
    if let Some(linkedin) = &user.linkedin_profile {
        lines.push(format!("LinkedIn: {linkedin}"));
    }
    if let Some(twitter) = &user.twitter_profile {
        lines.push(format!("Twitter: {twitter}"));
    }
    lines
}

pub fn users_lines(users: &[UserProfile]) -> Vec<String> {
    if users.is_empty() {
        return vec!["No users found.".to_string()];
    }
    users
        .iter()
        .map(|u| format!("{}  {}", u.id.as_deref().unwrap_or("-"), u.headline()))
        .collect()
}

pub fn skill_line(skill: &ScoredSkill) -> String {
    format!(
        "{:<24} {:<13} {:>3}%  {}",
        skill.name,
        skill.level,
        skill.progress,
        progress_bar(skill.progress)
    )
}

fn progress_bar(progress: u8) -> String {
    // Deserialized skills can carry out-of-range progress
    let filled = usize::from(progress.min(100)) / 5;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(20usize.saturating_sub(filled)))
}

pub fn skills_lines(skills: &[ScoredSkill]) -> Vec<String> {
    if skills.is_empty() {
        return vec!["No skills yet. Add one with `skillsync skills add`.".to_string()];
    }
    skills.iter().map(skill_line).collect()
}

/// Scored skills followed by tier counts and per-category totals
pub fn stats_lines(skills: &[ScoredSkill]) -> Vec<String> {
    let mut lines = Vec::new();
    for skill in skills {
        let tier = ProgressTier::of(skill.progress);
        lines.push(format!(
            "{}  {} ({} to go)",
            skill_line(skill),
            tier.motivation(),
            remaining(skill.progress)
        ));
    }

    let overview = SkillsOverview::from_scored(skills);
    lines.push(String::new());
    lines.push(format!(
        "{} skills: {} expert, {} advanced, {} intermediate, {} beginner",
        overview.total(),
        overview.expert,
        overview.advanced,
        overview.intermediate,
        overview.beginner
    ));
    for (category, count) in &overview.categories {
        lines.push(format!("  {category}: {count}"));
    }
    lines
}

pub fn dashboard_lines(state: &DashboardState) -> Vec<String> {
    let mut lines = Vec::new();
    match &state.dashboard {
        Some(snapshot) => lines.extend(snapshot_lines(snapshot)),
        None => lines.push("Dashboard data unavailable.".to_string()),
    }
    lines.push(String::new());
    lines.push("Your skills:".to_string());
    lines.extend(skills_lines(&state.skills).into_iter().map(|l| format!("  {l}")));
    lines
}

fn snapshot_lines(snapshot: &DashboardSnapshot) -> Vec<String> {
    let mut lines = vec![format!(
        "Team members: {}  Connected: {}  Pending requests: {}",
        snapshot.total_users.unwrap_or(snapshot.all_users.len() as u64),
        snapshot.accepted_count(),
        snapshot.pending_received_count()
    )];

    for colleague in &snapshot.all_users {
        let action = match colleague.connection_action() {
            ConnectionAction::Connected => "connected".to_string(),
            ConnectionAction::Connect => "connect".to_string(),
            ConnectionAction::AwaitingResponse => "awaiting response".to_string(),
            ConnectionAction::Respond {
                connection_id: Some(id),
            } => format!("respond --id {id}"),
            ConnectionAction::Respond { connection_id: None } => "respond".to_string(),
        };
        let role = colleague.role.as_deref().unwrap_or("");
        lines.push(format!("  {}  {:<20} {:<20} [{}]", colleague.id, colleague.name, role, action));
    }

    if snapshot.has_inspiration() {
        lines.push("Latest career inspiration is available (use --json to view).".to_string());
    }
    lines
}

pub fn connections_lines(overview: &ConnectionsOverview) -> Vec<String> {
    let stats = overview.stats();
    let mut lines = vec![format!(
        "Connections: {}  Pending received: {}  Pending sent: {}  Acceptance rate: {}%",
        stats.total_connections, stats.pending_received, stats.pending_sent, stats.acceptance_rate
    )];

    for record in overview.pending_received() {
        let message = record.message.as_deref().unwrap_or("");
        lines.push(format!(
            "  request {} from {}  {}",
            record.id,
            record.requester.headline(),
            message
        ));
    }
    for record in &overview.connections {
        lines.push(format!("  connected: {}", overview.other_party(record).headline()));
    }
    lines
}

pub fn flex_lines(entries: &[FlexEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["Nobody has flexed today yet.".to_string()];
    }
    entries
        .iter()
        .map(|entry| {
            let mut line = format!("{} flexed {}", entry.user.name, entry.skill);
            if let Some(progress) = entry.progress {
                line.push_str(&format!(" ({progress:.0}%)"));
            }
            if let Some(reason) = &entry.reason {
                line.push_str(&format!(": {reason}"));
            }
            line
        })
        .collect()
}

pub fn comparison_lines(comparison: &SkillComparison) -> Vec<String> {
    let mut lines = Vec::new();
    if !comparison.summary.is_empty() {
        lines.push(comparison.summary.clone());
    }
    for (title, items) in [
        ("Stronger in", &comparison.stronger_in),
        ("Weaker in", &comparison.weaker_in),
        ("Flex-worthy", &comparison.flex_worthy),
    ] {
        if items.is_empty() {
            continue;
        }
        lines.push(format!("{title}:"));
        for item in items {
            let detail = item
                .reason
                .as_deref()
                .or(item.suggestion.as_deref())
                .or(item.comment.as_deref())
                .unwrap_or("");
            lines.push(format!("  {}  {}", item.skill, detail));
        }
    }
    lines
}

pub fn banner_lines(banner: &Option<Banner>) -> Vec<String> {
    let Some(banner) = banner else {
        return vec!["No banner for today.".to_string()];
    };
    let mut lines = vec![banner.title.clone()];
    if let Some(description) = &banner.description {
        lines.push(description.clone());
    }
    if let Some(topic) = &banner.hot_topic {
        lines.push(format!("Hot topic: {topic}"));
    }
    lines
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn scored(name: &str, progress: u8) -> ScoredSkill {
        ScoredSkill {
            name: name.to_string(),
            level: "Advanced".to_string(),
            progress,
            category: None,
        }
    }

    #[test]
    fn test_progress_bar_width() {
        assert_eq!(progress_bar(0), format!("[{}]", ".".repeat(20)));
        assert_eq!(progress_bar(100), format!("[{}]", "#".repeat(20)));
        assert_eq!(progress_bar(50).len(), 22);
    }

    #[test]
    fn test_out_of_range_progress_renders_full_bar() {
        assert_eq!(progress_bar(255), progress_bar(100));
        let line = skill_line(&scored("Rust", 140));
        assert!(line.contains("140%"));
        assert!(line.ends_with(&format!("[{}]", "#".repeat(20))));
    }

    #[test]
    fn test_stats_summary() {
        let lines = stats_lines(&[scored("Rust", 80), scored("SQL", 45)]);
        assert!(lines[0].contains("Expert Level!"));
        assert!(lines[0].contains("(20 to go)"));
        assert!(lines[1].contains("Good Progress!"));
        assert!(lines.iter().any(|l| l == "  Technical: 2"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(flex_lines(&[]), ["Nobody has flexed today yet."]);
        assert_eq!(banner_lines(&None), ["No banner for today."]);
    }
}
