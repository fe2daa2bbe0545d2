use crate::cli::{BannerCommand, Cli, Command, ProfileCommand, ProfileUpdateArgs, SkillArgs, SkillsCommand};
use crate::config::Config;
use crate::output::{self, Output};
use anyhow::{bail, Context, Result};
use skillsync_client::{SkillSyncClient, TokenStore};
use skillsync_dashboard::{ActionError, CancellationToken, DashboardSync};
use skillsync_persistence::SessionStore;
use skillsync_types::{Credentials, FlexRequest, NewSkill, ProfileUpdate, Registration};
use std::sync::Arc;
use tokio::signal;
use tracing::{debug, error, info, warn};

/// Runs one CLI command against the backend
pub struct CliService {
    config: Config,
    cli: Cli,
}

impl CliService {
    pub fn new(config: Config, cli: Cli) -> Self {
        Self { config, cli }
    }

    pub async fn run(self) -> Result<()> {
        skillsync_logging::init_logging(self.cli.log_level(&self.config.logging.level), false)?;

        let mut client_config = self.config.client_config();
        if let Some(url) = &self.cli.api_url {
            client_config.base_url = url.clone();
        }
        info!(base_url = %client_config.base_url, "Starting SkillSync CLI");

        let sessions = SessionStore::new(&self.config.session_path())
            .await
            .context("Failed to open session store")?;

        let tokens = TokenStore::new();
        if let Some(session) = sessions.load().await? {
            debug!(user = %session.user.name, "Restored session");
            tokens.set(session.token);
        }

        let client = SkillSyncClient::new(&client_config, Arc::new(tokens.clone()))?;
        let out = Output::new(self.cli.json);

        let runner = Runner {
            client,
            tokens,
            sessions,
            out,
        };
        runner.dispatch(self.cli.command).await
    }
}

struct Runner {
    client: SkillSyncClient,
    tokens: TokenStore,
    sessions: SessionStore,
    out: Output,
}

impl Runner {
    async fn dispatch(&self, command: Command) -> Result<()> {
        match command {
            Command::Login { email, password } => self.login(email, password).await,
            Command::Register {
                name,
                email,
                password,
                role,
                department,
            } => {
                let registration = Registration {
                    name,
                    email,
                    password,
                    role,
                    department,
                };
                let auth = self.client.register(&registration).await?;
                self.start_session(&auth.token, &auth.user).await?;
                self.out.emit(&auth.user, |u| output::profile_lines(u))
            }
            Command::Logout => {
                self.tokens.clear();
                let removed = self.sessions.clear().await?;
                info!(removed, "Logged out");
                self.out.emit(&removed, |removed| {
                    vec![if *removed { "Logged out." } else { "No active session." }.to_string()]
                })
            }
            Command::Whoami => {
                let Some(session) = self.sessions.load().await? else {
                    bail!("Not logged in. Run `skillsync login` first.");
                };
                let user = match self.client.auth_profile().await {
                    Ok(user) => user,
                    Err(e) => {
                        warn!("Could not verify session, showing cached profile: {}", e);
                        session.user
                    }
                };
                self.out.emit(&user, |u| output::profile_lines(u))
            }
            Command::Profile(ProfileCommand::Show) => {
                let user = self.client.get_profile().await?;
                self.out.emit(&user, |u| output::profile_lines(u))
            }
            Command::Profile(ProfileCommand::Update(args)) => self.update_profile(args).await,
            Command::Skills(command) => self.skills(command).await,
            Command::Dashboard => {
                let sync = self.sync();
                let view = sync.refresh().await;
                if let Some(view) = view.view() {
                    for failure in &view.failures {
                        eprintln!("warning: could not load {}: {}", failure.source, failure.message);
                    }
                }
                sync.shutdown();
                self.out.emit(&sync.view().await, |s| output::dashboard_lines(s))
            }
            Command::Connect { user_id, name } => {
                let sync = self.sync();
                let name = name.unwrap_or_else(|| user_id.clone());
                let result = sync.send_connection(&user_id, &name).await;
                self.finish(&sync, result).await
            }
            Command::Respond {
                connection_id,
                decision,
                name,
            } => {
                let sync = self.sync();
                let name = name.unwrap_or_else(|| "this colleague".to_string());
                let result = sync
                    .respond_to_connection(connection_id.as_deref(), decision.into(), &name)
                    .await;
                self.finish(&sync, result).await
            }
            Command::Connections => {
                let overview = self.client.connections().await?;
                self.out.emit(&overview, |o| output::connections_lines(o))
            }
            Command::Inspire { user_id } => {
                let sync = self.sync();
                let result = sync.get_inspiration(&user_id).await;
                let inspiration = self.finish(&sync, result).await?;
                self.out.raw(&inspiration)
            }
            Command::AnalyzeLinkedin => {
                let sync = self.sync();
                let result = sync.analyze_linkedin().await;
                let analysis = self.finish(&sync, result).await?;
                self.out.raw(&analysis)
            }
            Command::Recommend(args) => {
                if args.ai {
                    let preferences: serde_json::Value = match &args.preferences {
                        Some(raw) => serde_json::from_str(raw).context("--preferences is not valid JSON")?,
                        None => serde_json::json!({}),
                    };
                    let recommendations = self.client.ai_enhanced_recommendations(&preferences).await?;
                    if !recommendations.success {
                        eprintln!("AI service unavailable; showing standard recommendations.");
                    }
                    self.out.raw(&recommendations)
                } else {
                    self.out.raw(&self.client.recommendations().await?)
                }
            }
            Command::AiStatus => {
                let status = self.client.ai_service_status().await;
                self.out.emit(&status, |s| {
                    let mut lines = vec![format!("AI service: {}", s.ai_service_status)];
                    if let Some(error) = &s.error {
                        lines.push(format!("Error: {error}"));
                    }
                    lines
                })
            }
            Command::Insights => self.out.raw(&self.client.profile_insights().await?),
            Command::Banner(command) => self.banner(command).await,
            Command::FlexWall => {
                let entries = self.client.flex_wall_today().await?;
                self.out.emit(&entries, |e| output::flex_lines(e))
            }
            Command::Flex {
                skill,
                progress,
                reason,
            } => {
                let sync = self.sync();
                let result = sync
                    .flex_skill(FlexRequest {
                        skill,
                        progress,
                        reason,
                    })
                    .await;
                self.finish(&sync, result).await?;
                self.out.emit(&sync.view().await.flex_wall, |e| output::flex_lines(e))
            }
            Command::Compare { user_id } => {
                let sync = self.sync();
                let result = sync.compare_skills(user_id.as_deref()).await;
                let comparison = self.finish(&sync, result).await?;
                self.out.emit(&comparison, |c| output::comparison_lines(c))
            }
            Command::Search { query } => {
                let users = self.client.search_users(&query).await?;
                self.out.emit(&users, |u| output::users_lines(u))
            }
            Command::Matches => self.out.raw(&self.client.matches().await?),
        }
    }

    async fn login(&self, email: String, password: String) -> Result<()> {
        let auth = self.client.login(&Credentials { email, password }).await?;
        self.start_session(&auth.token, &auth.user).await?;
        self.out.emit(&auth.user, |u| {
            let mut lines = vec![format!("Logged in as {}", u.name)];
            lines.extend(output::profile_lines(u).into_iter().skip(1));
            lines
        })
    }

    async fn start_session(&self, token: &str, user: &skillsync_types::UserProfile) -> Result<()> {
        self.tokens.set(token);
        self.sessions.save(token, user).await?;
        info!(user = %user.name, "Logged in");
        Ok(())
    }

    async fn update_profile(&self, args: ProfileUpdateArgs) -> Result<()> {
        let update = ProfileUpdate {
            name: args.name,
            role: args.role,
            department: args.department,
            bio: args.bio,
            linkedin_profile: args.linkedin,
            twitter_profile: args.twitter,
        };
        if update.is_empty() {
            bail!("Nothing to update. Pass at least one field, e.g. --bio.");
        }

        let user = self.client.update_profile(&update).await?;
        if let Some(mut session) = self.sessions.load().await? {
            session.user = user.clone();
            self.sessions.save(&session.token, &session.user).await?;
        }
        self.out.emit(&user, |u| output::profile_lines(u))
    }

    async fn skills(&self, command: SkillsCommand) -> Result<()> {
        match command {
            SkillsCommand::List => {
                let skills = self.client.list_skills().await?;
                let scored = skillsync_scoring::score_all(&skills);
                self.out.emit(&skills, |_| output::skills_lines(&scored))
            }
            SkillsCommand::Add(args) => {
                let skill = self.client.add_skill(&new_skill(args)).await?;
                let scored = skillsync_scoring::score_skill(&skill);
                self.out.emit(&skill, |_| vec![output::skill_line(&scored)])
            }
            SkillsCommand::Update { id, skill } => {
                let skill = self.client.update_skill(&id, &new_skill(skill)).await?;
                let scored = skillsync_scoring::score_skill(&skill);
                self.out.emit(&skill, |_| vec![output::skill_line(&scored)])
            }
            SkillsCommand::Delete { id } => {
                let response = self.client.delete_skill(&id).await?;
                self.out.emit(&response, |_| vec![format!("Deleted skill {id}.")])
            }
            SkillsCommand::Stats => {
                let scored = self.client.skills_stats().await?;
                self.out.emit(&scored, |s| output::stats_lines(s))
            }
        }
    }

    async fn banner(&self, command: BannerCommand) -> Result<()> {
        match command {
            BannerCommand::Today => {
                let sync = self.sync();
                let result = sync.refresh_banner().await;
                self.finish(&sync, result).await?;
                self.out.emit(&sync.view().await.banner, output::banner_lines)
            }
            BannerCommand::Generate => {
                let sync = self.sync();
                let result = sync.generate_banner().await;
                self.finish(&sync, result).await?;
                self.out.emit(&sync.view().await.banner, output::banner_lines)
            }
            BannerCommand::History => self.out.raw(&self.client.banner_history().await?),
        }
    }

    /// A dashboard flow over this run's client, cancelled on Ctrl+C
    fn sync(&self) -> DashboardSync<SkillSyncClient> {
        let cancel = CancellationToken::new();
        let on_signal = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                result = signal::ctrl_c() => {
                    if let Err(e) = result {
                        error!("Failed to install Ctrl+C handler: {}", e);
                        return;
                    }
                    info!("Received shutdown signal");
                    on_signal.cancel();
                }
                _ = on_signal.cancelled() => {}
            }
        });
        DashboardSync::with_cancellation(self.client.clone(), cancel)
    }

    /// Print the action's notice and turn its error into the command's
    async fn finish<T>(&self, sync: &DashboardSync<SkillSyncClient>, result: Result<T, ActionError>) -> Result<T> {
        self.out.notice(sync.notice().await.as_ref());
        sync.shutdown();
        match result {
            Ok(value) => Ok(value),
            Err(ActionError::Busy(control)) => bail!("{control} is already running"),
            Err(ActionError::Cancelled) => bail!("Interrupted"),
            Err(e) => Err(anyhow::Error::new(e).context("Action failed")),
        }
    }
}

fn new_skill(args: SkillArgs) -> NewSkill {
    NewSkill {
        name: args.name,
        category: args.category,
        proficiency: args.proficiency,
        years_of_experience: args.years,
    }
}
