// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection lifecycle: schema setup, PRAGMAs, and the single writer.
//!
//! Every query goes through one `tokio_rusqlite::Connection`, which runs
//! closures on its own background thread in submission order. Do not open a
//! second connection for writes.

use std::time::Duration;

use frosk_config::StorageConfig;
use frosk_core::FroskError;
use tracing::{debug, info};

use crate::migrations;

/// Handle to the vault database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if needed) the database at `config.database_path`,
    /// bring its schema up to date, and apply connection PRAGMAs.
    pub async fn open(config: &StorageConfig) -> Result<Self, FroskError> {
        let path = config.database_path.clone();
        let wal_mode = config.wal_mode;

        // Schema setup runs on a short-lived synchronous connection so that
        // refinery can own `&mut rusqlite::Connection`.
        let setup_path = path.clone();
        tokio::task::spawn_blocking(move || prepare_schema(&setup_path, wal_mode))
            .await
            .map_err(|e| FroskError::Internal(format!("schema setup task failed: {e}")))??;

        let conn = tokio_rusqlite::Connection::open(&path)
            .await
            .map_err(|e| FroskError::storage("opening database", e))?;

        let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            conn.busy_timeout(busy_timeout)?;
            conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA synchronous = NORMAL;")?;
            Ok(())
        })
        .await
        .map_err(|e| map_tr_err("configuring connection", e))?;

        info!(path = %path, wal_mode, "vault database opened");
        Ok(Self { conn })
    }

    /// The underlying async connection, for query modules.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }
}

/// Fold the WAL back into the main database file.
pub(crate) async fn checkpoint(conn: &tokio_rusqlite::Connection) -> Result<(), FroskError> {
    conn.call(|conn| -> Result<(), rusqlite::Error> {
        conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    })
    .await
    .map_err(|e| map_tr_err("checkpointing WAL", e))
}

fn prepare_schema(path: &str, wal_mode: bool) -> Result<(), FroskError> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| FroskError::storage("creating database directory", e))?;
        }
    }

    let mut conn =
        rusqlite::Connection::open(path).map_err(|e| FroskError::storage("opening database", e))?;
    let journal = if wal_mode { "WAL" } else { "DELETE" };
    let applied: String = conn
        .pragma_update_and_check(None, "journal_mode", journal, |row| row.get(0))
        .map_err(|e| FroskError::storage("setting journal mode", e))?;
    debug!(journal_mode = %applied, "journal mode set");
    migrations::run_migrations(&mut conn)
}

/// Convert a `tokio_rusqlite` call failure into a [`FroskError::Storage`].
pub fn map_tr_err(context: &str, e: tokio_rusqlite::Error<rusqlite::Error>) -> FroskError {
    tracing::error!(context, error = %e, "database call failed");
    FroskError::storage(context, e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_for(path: &std::path::Path) -> StorageConfig {
        StorageConfig {
            database_path: path.display().to_string(),
            wal_mode: true,
            busy_timeout_ms: 1000,
        }
    }

    #[tokio::test]
    async fn open_creates_file_and_tables() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("vault.db");
        let db = Database::open(&config_for(&path)).await.unwrap();
        assert!(path.exists());

        let tables: Vec<String> = db
            .connection()
            .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' \
                     AND name IN ('master', 'credentials') ORDER BY name",
                )?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                rows.collect()
            })
            .await
            .unwrap();
        assert_eq!(tables, vec!["credentials".to_string(), "master".to_string()]);
        checkpoint(db.connection()).await.unwrap();
    }

    #[tokio::test]
    async fn wal_mode_is_applied() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wal.db");
        let db = Database::open(&config_for(&path)).await.unwrap();
        let mode: String = db
            .connection()
            .call(|conn| -> Result<String, rusqlite::Error> {
                conn.query_row("PRAGMA journal_mode", [], |row| row.get(0))
            })
            .await
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn reopen_keeps_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reopen.db");
        drop(Database::open(&config_for(&path)).await.unwrap());
        // Migrations are idempotent across opens.
        let db = Database::open(&config_for(&path)).await.unwrap();
        checkpoint(db.connection()).await.unwrap();
    }
}
