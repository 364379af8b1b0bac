// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The vault façade: one entry point per user-visible operation.
//!
//! The façade holds collaborators, not secrets. Every call that needs the
//! data key takes the master password and re-derives the key for that call
//! alone, so there is no locked/unlocked session to manage.

use std::sync::Arc;

use frosk_config::VaultConfig;
use frosk_core::{ErrorKind, FroskError, HealthStatus, StorageAdapter, VaultState};
use secrecy::SecretString;
use tracing::{error, info, warn};

use crate::credentials::{Credential, CredentialStore};
use crate::master::MasterKeyManager;

/// A password vault over an injected storage backend.
#[derive(Clone)]
pub struct Vault {
    storage: Arc<dyn StorageAdapter>,
    keys: MasterKeyManager,
    credentials: CredentialStore,
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("storage", &self.storage.name())
            .finish()
    }
}

impl Vault {
    pub fn new(storage: Arc<dyn StorageAdapter>, config: VaultConfig) -> Self {
        let keys = MasterKeyManager::new(Arc::clone(&storage), config);
        let credentials = CredentialStore::new(Arc::clone(&storage), keys.clone());
        Self {
            storage,
            keys,
            credentials,
        }
    }

    /// Whether a master password has been set. Callers route first-run setup
    /// on this.
    pub async fn state(&self) -> Result<VaultState, FroskError> {
        self.keys.state().await
    }

    pub async fn is_initialized(&self) -> Result<bool, FroskError> {
        self.keys.is_initialized().await
    }

    /// Set the master password. Only succeeds once per vault.
    pub async fn initialize(&self, master: &SecretString) -> Result<(), FroskError> {
        self.keys
            .initialize_master(master)
            .await
            .inspect_err(|e| log_failure("initialize", e))
    }

    /// `Ok(false)` for a wrong master password.
    pub async fn authenticate(&self, master: &SecretString) -> Result<bool, FroskError> {
        self.keys
            .authenticate(master)
            .await
            .inspect_err(|e| log_failure("authenticate", e))
    }

    /// Fail with [`FroskError::MasterPasswordMismatch`] unless `master` is correct.
    pub async fn require_master_password(&self, master: &SecretString) -> Result<(), FroskError> {
        self.keys
            .require_master_password(master)
            .await
            .inspect_err(|e| log_failure("require_master_password", e))
    }

    pub async fn add_credential(
        &self,
        service_name: &str,
        username: &str,
        password: &SecretString,
        master: &SecretString,
    ) -> Result<(), FroskError> {
        self.credentials
            .add_credential(service_name, username, password, master)
            .await
            .inspect_err(|e| log_failure("add_credential", e))
    }

    pub async fn get_credential(
        &self,
        service_name: &str,
        master: &SecretString,
    ) -> Result<Credential, FroskError> {
        self.credentials
            .get_credential(service_name, master)
            .await
            .inspect_err(|e| log_failure("get_credential", e))
    }

    /// Remove a credential. Confirmation, if any, is the caller's job.
    pub async fn delete_credential(&self, service_name: &str) -> Result<(), FroskError> {
        self.credentials
            .delete_credential(service_name)
            .await
            .inspect_err(|e| log_failure("delete_credential", e))
    }

    pub async fn list_services(&self) -> Result<Vec<String>, FroskError> {
        self.credentials
            .list_service_names()
            .await
            .inspect_err(|e| log_failure("list_services", e))
    }

    pub async fn health_check(&self) -> Result<HealthStatus, FroskError> {
        self.storage.health_check().await
    }

    /// Flush the storage backend.
    pub async fn close(&self) -> Result<(), FroskError> {
        self.storage.close().await?;
        info!(storage = self.storage.name(), "vault closed");
        Ok(())
    }
}

fn log_failure(operation: &str, err: &FroskError) {
    match err.kind() {
        kind @ ErrorKind::Internal => error!(operation, %kind, "vault operation failed: {err}"),
        kind if err.is_expected() => info!(operation, %kind, "vault operation rejected: {err}"),
        kind => warn!(operation, %kind, "vault operation failed: {err}"),
    }
}

/// Mask a secret for display: first and last four characters around `...`.
/// Anything shorter than ten characters becomes `****`.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() < 10 {
        return "****".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix}")
}
