// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ready-made vaults for integration tests.
//!
//! `TestVault` wires a [`Vault`] over either [`MemoryStorage`] or a SQLite
//! file in a temp directory, with KDF and hashing costs turned down so tests
//! stay fast.

use std::sync::Arc;

use frosk_config::{StorageConfig, VaultConfig};
use frosk_core::{FroskError, StorageAdapter};
use frosk_storage::SqliteStorage;
use frosk_vault::Vault;
use secrecy::SecretString;
use tempfile::TempDir;

use crate::memory::MemoryStorage;

/// Master password used by [`TestVault::initialized`].
pub const MASTER_PASSWORD: &str = "correct-horse";

/// Vault parameters at the lowest values validation accepts.
pub fn cheap_vault_config() -> VaultConfig {
    VaultConfig {
        kdf_iterations: 1000,
        hash_time_cost: 1,
        hash_memory_cost: 1024,
        hash_parallelism: 1,
    }
}

pub fn secret(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

enum Backend {
    Memory,
    Sqlite,
}

/// Builder for a [`TestVault`].
pub struct TestVaultBuilder {
    backend: Backend,
    config: VaultConfig,
}

impl TestVaultBuilder {
    /// Store rows in a SQLite file instead of memory.
    pub fn with_sqlite(mut self) -> Self {
        self.backend = Backend::Sqlite;
        self
    }

    pub fn with_config(mut self, config: VaultConfig) -> Self {
        self.config = config;
        self
    }

    pub async fn build(self) -> Result<TestVault, FroskError> {
        let mut memory = None;
        let mut dir = None;
        let storage: Arc<dyn StorageAdapter> = match self.backend {
            Backend::Memory => {
                let backend = Arc::new(MemoryStorage::new());
                memory = Some(Arc::clone(&backend));
                backend
            }
            Backend::Sqlite => {
                let temp = TempDir::new()
                    .map_err(|e| FroskError::storage("creating temp directory", e))?;
                let config = StorageConfig {
                    database_path: temp.path().join("test.db").display().to_string(),
                    wal_mode: true,
                    busy_timeout_ms: 5000,
                };
                let storage = SqliteStorage::open(config).await?;
                dir = Some(temp);
                Arc::new(storage)
            }
        };
        tracing::debug!(storage = storage.name(), "test vault ready");
        Ok(TestVault {
            vault: Vault::new(Arc::clone(&storage), self.config),
            storage,
            memory,
            _dir: dir,
        })
    }
}

/// A vault plus handles to its backend. The temp directory, if any, lives as
/// long as this value.
pub struct TestVault {
    pub vault: Vault,
    pub storage: Arc<dyn StorageAdapter>,
    memory: Option<Arc<MemoryStorage>>,
    _dir: Option<TempDir>,
}

impl TestVault {
    pub fn builder() -> TestVaultBuilder {
        TestVaultBuilder {
            backend: Backend::Memory,
            config: cheap_vault_config(),
        }
    }

    /// An in-memory vault with [`MASTER_PASSWORD`] already set.
    pub async fn initialized() -> Result<Self, FroskError> {
        let tv = Self::builder().build().await?;
        tv.vault.initialize(&secret(MASTER_PASSWORD)).await?;
        Ok(tv)
    }

    /// The in-memory backend, when the vault was built without SQLite.
    pub fn memory(&self) -> Option<&MemoryStorage> {
        self.memory.as_deref()
    }

    /// Add a credential using [`MASTER_PASSWORD`].
    pub async fn add(&self, service: &str, username: &str, password: &str) -> Result<(), FroskError> {
        self.vault
            .add_credential(service, username, &secret(password), &secret(MASTER_PASSWORD))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[tokio::test]
    async fn initialized_vault_accepts_the_fixture_password() {
        let tv = TestVault::initialized().await.unwrap();
        assert!(tv.vault.authenticate(&secret(MASTER_PASSWORD)).await.unwrap());
        assert!(tv.memory().is_some());
    }

    #[tokio::test]
    async fn sqlite_backend_roundtrips() {
        let tv = TestVault::builder().with_sqlite().build().await.unwrap();
        assert!(tv.memory().is_none());
        tv.vault.initialize(&secret(MASTER_PASSWORD)).await.unwrap();
        tv.add("github", "alice", "p@ss1").await.unwrap();
        let cred = tv
            .vault
            .get_credential("github", &secret(MASTER_PASSWORD))
            .await
            .unwrap();
        assert_eq!(cred.password.expose_secret(), "p@ss1");
    }
}
