use anyhow::{Context, Result};
use serde::Deserialize;
use skillsync_client::{ClientConfig, DEFAULT_BASE_URL};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config template created when no config exists
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:5000/api"  # Set via SKILLSYNC_API_URL env var
default_timeout_secs = 30

[session]
path = "~/.skillsync/session.db"

[logging]
level = "info"  # trace, debug, info, warn, error
"#;

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub default_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_session_path() -> String {
    "~/.skillsync/session.db".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

impl Config {
    /// Get the global config path: ~/.skillsync/skillsync.toml
    fn global_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".skillsync").join("skillsync.toml"))
    }

    /// Ensure global config directory and file exist, creating defaults if needed
    fn ensure_global_config() -> Result<PathBuf> {
        let config_path = Self::global_config_path()?;

        if let Some(config_dir) = config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir)?;
                eprintln!("Created config directory: {}", config_dir.display());
            }
        }

        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG.trim())?;
            eprintln!("Created default config: {}", config_path.display());
        }

        Ok(config_path)
    }

    /// Load configuration with layered approach:
    /// 1. Global config: ~/.skillsync/skillsync.toml (auto-created if missing)
    /// 2. Local override: ./skillsync.toml (optional)
    /// 3. Environment variables (highest priority)
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let global_config_path = Self::ensure_global_config()?;
        Self::load_from(&global_config_path, Path::new("skillsync.toml"))
    }

    fn load_from(global: &Path, local: &Path) -> Result<Self> {
        let mut config_builder = config::Config::builder()
            .add_source(config::File::from(global))
            .add_source(config::File::from(local).required(false))
            .add_source(
                config::Environment::with_prefix("SKILLSYNC")
                    .prefix_separator("__")
                    .separator("__"),
            );

        // Convenience env var overrides
        if let Ok(url) = env::var("SKILLSYNC_API_URL") {
            config_builder = config_builder.set_override("api.base_url", url)?;
        }

        if let Ok(level) = env::var("SKILLSYNC_LOG_LEVEL") {
            config_builder = config_builder.set_override("logging.level", level)?;
        }

        let config = config_builder
            .build()
            .with_context(|| format!("Failed to read config from {}", global.display()))?;

        let config: Self = config.try_deserialize()?;
        Ok(config)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api.base_url.clone())
            .with_default_timeout(Duration::from_secs(self.api.default_timeout_secs))
    }

    /// Session database path with a leading `~` expanded
    pub fn session_path(&self) -> String {
        expand_home(&self.session.path)
    }
}

fn expand_home(path: &str) -> String {
    match (path.strip_prefix('~'), dirs::home_dir()) {
        (Some(rest), Some(home)) => format!("{}{}", home.display(), rest),
        _ => path.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.default_timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_local_file_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let local = dir.path().join("local.toml");
        fs::write(&global, DEFAULT_CONFIG).unwrap();
        fs::write(&local, "[api]\ndefault_timeout_secs = 5\n").unwrap();

        let config = Config::load_from(&global, &local).unwrap();

        assert_eq!(config.api.default_timeout_secs, 5);
        assert_eq!(config.session.path, "~/.skillsync/session.db");
        assert_eq!(config.client_config().default_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_local_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(&global, DEFAULT_CONFIG).unwrap();

        let config = Config::load_from(&global, &dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/session.db"), "/tmp/session.db");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_home("~/.skillsync/session.db"),
                format!("{}/.skillsync/session.db", home.display())
            );
        }
    }
}
