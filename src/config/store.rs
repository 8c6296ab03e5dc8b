//! Persisted key-value settings backed by SQLite.
//!
//! Holds the base URL set via `muse config set`, so the endpoint does not
//! have to be passed on every run. Quotes themselves are never stored.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, OptionalExtension};

use super::Endpoint;

const BASE_URL_KEY: &str = "base_url";

/// Persistent key-value settings store.
pub struct Settings {
    conn: Mutex<Connection>,
}

impl Settings {
    /// Open or create the settings table at `path`, creating parent
    /// directories as needed. Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        if path != ":memory:"
            && let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let conn = Connection::open(path).context("failed to open settings database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS settings (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .context("failed to create settings table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("settings connection poisoned"))
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        conn.query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()
        .with_context(|| format!("failed to read setting {key:?}"))
    }

    /// Set a value (upsert).
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )
        .with_context(|| format!("failed to write setting {key:?}"))?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM settings WHERE key = ?1", [key])
            .with_context(|| format!("failed to remove setting {key:?}"))?;
        Ok(())
    }

    pub fn base_url(&self) -> Result<Option<String>> {
        self.get(BASE_URL_KEY)
    }

    /// Store the endpoint's base URL. Only validated endpoints get here.
    pub fn set_base_url(&self, endpoint: &Endpoint) -> Result<()> {
        let base = endpoint.base().as_str().trim_end_matches('/');
        self.set(BASE_URL_KEY, base)
    }

    pub fn clear_base_url(&self) -> Result<()> {
        self.remove(BASE_URL_KEY)
    }
}
