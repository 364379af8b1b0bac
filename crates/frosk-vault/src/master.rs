// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The master-password envelope around the data encryption key (DEK).
//!
//! Two independent secrets come from the master password:
//! - an Argon2id PHC hash, used only to answer "is this the right password";
//! - a PBKDF2 wrapping key, used only to seal and unseal the random DEK.
//!
//! Nothing is cached between calls. Every operation that needs the DEK
//! derives the wrapping key again from the stored salt.

use std::sync::Arc;

use frosk_config::VaultConfig;
use frosk_core::{FroskError, MasterRecord, StorageAdapter, VaultState};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, info, warn};
use zeroize::Zeroizing;

use crate::crypto::{self, KEY_LEN, NONCE_LEN};
use crate::encoding;
use crate::kdf::{self, SALT_LEN};
use crate::password::{self, HashCost};

/// The unwrapped DEK. Lives for one operation and is zeroized on drop.
pub struct DataKey(Zeroizing<[u8; KEY_LEN]>);

impl DataKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

impl std::fmt::Debug for DataKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DataKey([REDACTED])")
    }
}

/// Creates and checks the master envelope over an injected storage backend.
#[derive(Clone)]
pub struct MasterKeyManager {
    storage: Arc<dyn StorageAdapter>,
    config: VaultConfig,
}

impl MasterKeyManager {
    pub fn new(storage: Arc<dyn StorageAdapter>, config: VaultConfig) -> Self {
        Self { storage, config }
    }

    /// True once a master row exists.
    pub async fn is_initialized(&self) -> Result<bool, FroskError> {
        Ok(self.storage.count_master().await? > 0)
    }

    pub async fn state(&self) -> Result<VaultState, FroskError> {
        Ok(if self.is_initialized().await? {
            VaultState::Initialized
        } else {
            VaultState::Uninitialized
        })
    }

    /// One-time vault setup: hash the master password, generate and wrap a
    /// fresh DEK, and persist both in a single insert.
    pub async fn initialize_master(&self, master: &SecretString) -> Result<(), FroskError> {
        let secret = non_empty(master)?;

        // Cheap early exit; the singleton constraint below is authoritative.
        if self.is_initialized().await? {
            return Err(FroskError::AlreadyInitialized);
        }

        let iterations = self.config.kdf_iterations;
        let cost = HashCost::from_config(&self.config);
        let record = blocking(move || seal_new_master(&secret, iterations, &cost)).await?;

        let rows = self.storage.insert_master(&record).await?;
        if rows != 1 {
            error!(rows, "master insert affected an unexpected number of rows");
            return Err(FroskError::PersistenceInvariantViolation(format!(
                "master insert affected {rows} rows, expected 1"
            )));
        }
        info!(kdf_iterations = iterations, "vault initialized");
        Ok(())
    }

    /// Verify the master password against the stored hash.
    ///
    /// A wrong password is `Ok(false)`, not an error.
    pub async fn authenticate(&self, master: &SecretString) -> Result<bool, FroskError> {
        let secret = non_empty(master)?;
        let record = self.load().await?;
        let hash = record.password_hash;
        let ok = blocking(move || password::verify_password(&hash, &secret)).await?;
        if ok {
            debug!("master password accepted");
        } else {
            warn!("master password rejected");
        }
        Ok(ok)
    }

    /// Like [`authenticate`](Self::authenticate) but a mismatch is
    /// [`FroskError::MasterPasswordMismatch`].
    pub async fn require_master_password(&self, master: &SecretString) -> Result<(), FroskError> {
        if self.authenticate(master).await? {
            Ok(())
        } else {
            Err(FroskError::MasterPasswordMismatch)
        }
    }

    /// Re-derive the wrapping key and open the stored DEK.
    ///
    /// Does not consult the password hash: a wrong password surfaces here as
    /// [`FroskError::DecryptionFailed`].
    pub async fn unwrap_data_key(&self, master: &SecretString) -> Result<DataKey, FroskError> {
        let secret = non_empty(master)?;
        let record = self.load().await?;

        let salt: [u8; SALT_LEN] = encoding::decode_array("salt", &record.salt)?;
        let nonce: [u8; NONCE_LEN] = encoding::decode_array("wrap_nonce", &record.wrap_nonce)?;
        let wrapped = encoding::decode("wrapped_data_key", &record.wrapped_data_key)?;
        let iterations = record.kdf_iterations;

        let key = blocking(move || {
            let wrapping_key = kdf::derive_key(&secret, &salt, iterations)?;
            let dek = crypto::build_aead(&wrapping_key[..])?.open(
                &nonce,
                &wrapped,
                &[],
                "unwrapping data key",
            )?;
            let bytes: [u8; KEY_LEN] = dek.as_slice().try_into().map_err(|_| {
                FroskError::CorruptedRecord(format!(
                    "data key must be {KEY_LEN} bytes, found {}",
                    dek.len()
                ))
            })?;
            Ok(DataKey(Zeroizing::new(bytes)))
        })
        .await;

        if let Err(FroskError::DecryptionFailed { .. }) = &key {
            warn!("data key could not be unwrapped");
        }
        key
    }

    async fn load(&self) -> Result<MasterRecord, FroskError> {
        self.storage
            .load_master()
            .await?
            .ok_or(FroskError::NotInitialized)
    }
}

fn non_empty(master: &SecretString) -> Result<Zeroizing<Vec<u8>>, FroskError> {
    let bytes = master.expose_secret().as_bytes();
    if bytes.is_empty() {
        return Err(FroskError::EmptyMasterPassword);
    }
    Ok(Zeroizing::new(bytes.to_vec()))
}

fn seal_new_master(
    secret: &[u8],
    iterations: u32,
    cost: &HashCost,
) -> Result<MasterRecord, FroskError> {
    let salt = kdf::generate_salt()?;
    let wrapping_key = kdf::derive_key(secret, &salt, iterations)?;
    let dek = crypto::generate_random_key()?;
    let wrap_nonce = crypto::generate_nonce()?;
    let wrapped = crypto::seal(&wrapping_key[..], &wrap_nonce, &dek[..], &[])?;
    let password_hash = password::hash_password(secret, cost)?;

    let now = encoding::now_timestamp();
    Ok(MasterRecord {
        password_hash,
        wrapped_data_key: encoding::encode(&wrapped),
        salt: encoding::encode(&salt),
        wrap_nonce: encoding::encode(&wrap_nonce),
        kdf_iterations: iterations,
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Run CPU-bound key work on the blocking pool.
pub(crate) async fn blocking<T, F>(work: F) -> Result<T, FroskError>
where
    F: FnOnce() -> Result<T, FroskError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| FroskError::Internal(format!("key derivation task failed: {e}")))?
}
