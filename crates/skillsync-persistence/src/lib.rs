//! Local session storage
//!
//! Keeps the signed-in user's bearer token between CLI invocations in a small
//! SQLite database. At most one session is stored at a time.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use skillsync_types::UserProfile;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A stored login
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: Uuid,
    pub token: String,
    pub user: UserProfile,
    pub created_at: DateTime<Utc>,
}

/// SQLite-backed session store
pub struct SessionStore {
    pool: SqlitePool,
}

impl SessionStore {
    /// Open (or create) the session database at `database_path`
    pub async fn new(database_path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path);
        let pool = SqlitePool::connect(&database_url)
            .await
            .with_context(|| format!("Failed to open session database {}", database_path))?;

        let store = Self { pool };
        store.run_migrations().await?;

        info!("Session store initialized with database: {}", database_path);
        Ok(store)
    }

    /// Throwaway store, used by tests and `--no-session` runs
    pub async fn in_memory() -> Result<Self> {
        // One connection, or every pooled connection gets its own empty database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                token TEXT NOT NULL,
                user_json TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        debug!("Session migrations completed");
        Ok(())
    }

    /// Replace any stored session with a new one
    pub async fn save(&self, token: &str, user: &UserProfile) -> Result<Session> {
        let session = Session {
            id: Uuid::new_v4(),
            token: token.to_string(),
            user: user.clone(),
            created_at: Utc::now(),
        };
        let user_json = serde_json::to_string(&session.user)?;

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM sessions").execute(&mut *tx).await?;
        sqlx::query(
            r#"
            INSERT INTO sessions (id, token, user_json, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(session.id.to_string())
        .bind(&session.token)
        .bind(user_json)
        .bind(session.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        info!(session_id = %session.id, user = %session.user.name, "Session saved");
        Ok(session)
    }

    /// The stored session, if any
    pub async fn load(&self) -> Result<Option<Session>> {
        let row = sqlx::query(
            r#"
            SELECT id, token, user_json, created_at
            FROM sessions
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: String = row.get("id");
        let user_json: String = row.get("user_json");
        let created_at: String = row.get("created_at");

        let user = serde_json::from_str(&user_json).unwrap_or_else(|e| {
            warn!("Stored user profile is unreadable: {}", e);
            UserProfile::default()
        });
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(Some(Session {
            id: id.parse().context("Stored session id is not a UUID")?,
            token: row.get("token"),
            user,
            created_at,
        }))
    }

    /// Remove the stored session; returns whether one existed
    pub async fn clear(&self) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions")
            .execute(&self.pool)
            .await?;
        let removed = result.rows_affected() > 0;
        if removed {
            info!("Session cleared");
        }
        Ok(removed)
    }
}
