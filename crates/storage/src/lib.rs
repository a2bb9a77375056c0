use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};

/// Durable key-value store for the client. Only session credentials
/// survive a restart; everything else the client holds is rebuilt fresh
/// each run.
#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

/// Persisted session fields, exactly as written at login time. The role
/// is kept as the raw string and re-validated when the session is
/// restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub token: String,
    pub role: String,
    pub display_name: String,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        let storage = Self { pool };
        storage.ensure_credentials_table().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    async fn ensure_credentials_table(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS session_credentials (
                slot         INTEGER PRIMARY KEY CHECK (slot = 1),
                token        TEXT NOT NULL,
                role         TEXT NOT NULL,
                display_name TEXT NOT NULL,
                saved_at     TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to ensure session_credentials table exists")?;
        Ok(())
    }

    /// Writes the credential slot, replacing whatever was there.
    pub async fn save_credentials(&self, credentials: &StoredCredentials) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO session_credentials (slot, token, role, display_name, saved_at)
            VALUES (1, ?, ?, ?, ?)
            ON CONFLICT (slot) DO UPDATE SET
                token = excluded.token,
                role = excluded.role,
                display_name = excluded.display_name,
                saved_at = excluded.saved_at
            "#,
        )
        .bind(&credentials.token)
        .bind(&credentials.role)
        .bind(&credentials.display_name)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .context("failed to persist session credentials")?;
        Ok(())
    }

    pub async fn load_credentials(&self) -> Result<Option<StoredCredentials>> {
        let row = sqlx::query(
            "SELECT token, role, display_name FROM session_credentials WHERE slot = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .context("failed to read session credentials")?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(StoredCredentials {
            token: row.try_get("token")?,
            role: row.try_get("role")?,
            display_name: row.try_get("display_name")?,
        }))
    }

    pub async fn clear_credentials(&self) -> Result<()> {
        sqlx::query("DELETE FROM session_credentials")
            .execute(&self.pool)
            .await
            .context("failed to clear session credentials")?;
        Ok(())
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
