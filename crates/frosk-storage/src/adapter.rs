// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of [`StorageAdapter`].

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use frosk_config::StorageConfig;
use frosk_core::{CredentialRecord, FroskError, HealthStatus, MasterRecord, StorageAdapter};

use crate::database::{self, Database};
use crate::queries;

/// SQLite-backed storage. The database is opened lazily on first use.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create an adapter for `config.database_path` without touching disk.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Create the adapter and open the database immediately.
    pub async fn open(config: StorageConfig) -> Result<Self, FroskError> {
        let storage = Self::new(config);
        storage.db().await?;
        Ok(storage)
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &str {
        &self.config.database_path
    }

    async fn db(&self) -> Result<&Database, FroskError> {
        self.db
            .get_or_try_init(|| async {
                let db = Database::open(&self.config).await?;
                debug!(path = %self.config.database_path, "SQLite storage initialized");
                Ok::<_, FroskError>(db)
            })
            .await
    }
}

/// Reachable, but not in the journal mode the config asked for.
fn journal_health(wal_expected: bool, mode: &str) -> HealthStatus {
    if wal_expected && !mode.eq_ignore_ascii_case("wal") {
        HealthStatus::Degraded(format!("journal mode is {mode}, expected wal"))
    } else {
        HealthStatus::Healthy
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn health_check(&self) -> Result<HealthStatus, FroskError> {
        let db = match self.db().await {
            Ok(db) => db,
            Err(e) => return Ok(HealthStatus::Unhealthy(e.to_string())),
        };
        let probe = db
            .connection()
            .call(|conn| -> Result<String, rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                conn.query_row("PRAGMA journal_mode", [], |row| row.get(0))
            })
            .await;
        Ok(match probe {
            Ok(mode) => journal_health(self.config.wal_mode, &mode),
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        })
    }

    async fn close(&self) -> Result<(), FroskError> {
        // The connection itself is released on drop; only flush the WAL here.
        if let Some(db) = self.db.get() {
            database::checkpoint(db.connection()).await?;
            debug!("WAL checkpoint complete");
        }
        Ok(())
    }

    async fn count_master(&self) -> Result<u64, FroskError> {
        queries::master::count_master(self.db().await?).await
    }

    async fn insert_master(&self, record: &MasterRecord) -> Result<usize, FroskError> {
        queries::master::insert_master(self.db().await?, record).await
    }

    async fn load_master(&self) -> Result<Option<MasterRecord>, FroskError> {
        queries::master::load_master(self.db().await?).await
    }

    async fn count_service(&self, service_name: &str) -> Result<u64, FroskError> {
        queries::credentials::count_service(self.db().await?, service_name).await
    }

    async fn insert_credential(&self, record: &CredentialRecord) -> Result<usize, FroskError> {
        queries::credentials::insert_credential(self.db().await?, record).await
    }

    async fn get_credential(
        &self,
        service_name: &str,
    ) -> Result<Option<CredentialRecord>, FroskError> {
        queries::credentials::get_credential(self.db().await?, service_name).await
    }

    async fn delete_credential(&self, service_name: &str) -> Result<usize, FroskError> {
        queries::credentials::delete_credential(self.db().await?, service_name).await
    }

    async fn list_service_names(&self) -> Result<Vec<String>, FroskError> {
        queries::credentials::list_service_names(self.db().await?).await
    }
}
