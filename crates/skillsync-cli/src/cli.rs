//! Command-line definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use skillsync_types::RespondStatus;

/// SkillSync - track skills, connect with colleagues, get AI career guidance
#[derive(Parser, Debug)]
#[command(name = "skillsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    /// Backend base URL, overriding config
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Log level after applying `-v` on top of the configured one
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        match self.verbose {
            0 => configured,
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SKILLSYNC_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "SKILLSYNC_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        department: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show who the stored session belongs to
    Whoami,

    /// View or edit your profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Manage your skills
    #[command(subcommand)]
    Skills(SkillsCommand),

    /// Refresh and show the dashboard
    Dashboard,

    /// Send a connection request
    Connect {
        user_id: String,
        /// Name used in the confirmation message
        #[arg(long)]
        name: Option<String>,
    },

    /// Accept or reject a pending connection request
    Respond {
        /// Connection id from `skillsync dashboard`
        #[arg(long = "id")]
        connection_id: Option<String>,
        #[arg(value_enum)]
        decision: Decision,
        #[arg(long)]
        name: Option<String>,
    },

    /// List requests and connections
    Connections,

    /// Generate career inspiration from a connected colleague
    Inspire { user_id: String },

    /// Analyze your LinkedIn profile
    AnalyzeLinkedin,

    /// Get mentor and learning recommendations
    Recommend(RecommendArgs),

    /// Check whether the AI service is reachable
    AiStatus,

    /// AI insights about your profile
    Insights,

    /// Daily banner
    #[command(subcommand)]
    Banner(BannerCommand),

    /// Show today's flex wall
    FlexWall,

    /// Flex a skill on the shared wall
    Flex {
        skill: String,
        #[arg(long)]
        progress: Option<f64>,
        #[arg(long)]
        reason: Option<String>,
    },

    /// Compare your skills with a colleague's
    Compare { user_id: Option<String> },

    /// Search users by name, role or skill
    Search { query: String },

    /// Colleagues whose skills complement yours
    Matches,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    Show,
    Update(ProfileUpdateArgs),
}

#[derive(Args, Debug, Default)]
pub struct ProfileUpdateArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
    #[arg(long)]
    pub linkedin: Option<String>,
    #[arg(long)]
    pub twitter: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum SkillsCommand {
    List,
    Add(SkillArgs),
    Update {
        id: String,
        #[command(flatten)]
        skill: SkillArgs,
    },
    Delete {
        id: String,
    },
    /// Scored skills with tier counts
    Stats,
}

#[derive(Args, Debug)]
pub struct SkillArgs {
    pub name: String,
    /// beginner, intermediate, advanced or expert
    #[arg(long, default_value = "beginner")]
    pub proficiency: String,
    #[arg(long, default_value_t = 0.0)]
    pub years: f64,
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Use the AI-enhanced recommender
    #[arg(long)]
    pub ai: bool,
    /// Preferences as JSON, sent with --ai
    #[arg(long, requires = "ai")]
    pub preferences: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum BannerCommand {
    Today,
    Generate,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Decision {
    Accept,
    Reject,
}

impl From<Decision> for RespondStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Accept => RespondStatus::Accepted,
            Decision::Reject => RespondStatus::Rejected,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_respond() {
        let cli = Cli::try_parse_from(["skillsync", "respond", "--id", "c7", "accept", "--name", "Linus"])
            .unwrap();
        match cli.command {
            Command::Respond {
                connection_id,
                decision,
                name,
            } => {
                assert_eq!(connection_id.as_deref(), Some("c7"));
                assert_eq!(RespondStatus::from(decision), RespondStatus::Accepted);
                assert_eq!(name.as_deref(), Some("Linus"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_skill_add_defaults() {
        let cli = Cli::try_parse_from(["skillsync", "--json", "skills", "add", "Rust"]).unwrap();
        assert!(cli.json);
        let Command::Skills(SkillsCommand::Add(args)) = cli.command else {
            panic!("expected skills add");
        };
        assert_eq!(args.name, "Rust");
        assert_eq!(args.proficiency, "beginner");
        assert_eq!(args.years, 0.0);
    }

    #[test]
    fn test_verbosity_overrides_level() {
        let cli = Cli::try_parse_from(["skillsync", "-vv", "whoami"]).unwrap();
        assert_eq!(cli.log_level("warn"), "trace");
        let cli = Cli::try_parse_from(["skillsync", "whoami"]).unwrap();
        assert_eq!(cli.log_level("warn"), "warn");
    }
}
