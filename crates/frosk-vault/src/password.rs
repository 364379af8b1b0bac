// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argon2id hashing of the master password, for authentication only.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so
//! verification reads its cost parameters from the stored hash and keeps
//! working after the configured cost changes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use frosk_config::VaultConfig;
use frosk_core::FroskError;
use tracing::error;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Passes over memory. Hashing time is roughly linear in this.
    pub time_cost: u32,
    /// Memory in KiB.
    pub memory_cost: u32,
    pub parallelism: u32,
}

impl HashCost {
    pub fn from_config(config: &VaultConfig) -> Self {
        Self {
            time_cost: config.hash_time_cost,
            memory_cost: config.hash_memory_cost,
            parallelism: config.hash_parallelism,
        }
    }

    fn hasher(&self) -> Result<Argon2<'static>, FroskError> {
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|e| {
                error!(cost = ?self, "invalid Argon2id parameters: {e}");
                FroskError::Primitive(format!("invalid Argon2id parameters: {e}"))
            })?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Hash `plaintext` with a fresh random salt.
pub fn hash_password(plaintext: &[u8], cost: &HashCost) -> Result<String, FroskError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = cost
        .hasher()?
        .hash_password(plaintext, &salt)
        .map_err(|e| {
            error!("Argon2id hashing failed: {e}");
            FroskError::Primitive(format!("password hashing failed: {e}"))
        })?;
    Ok(hash.to_string())
}

/// Check `plaintext` against a stored PHC hash in constant time.
///
/// `Ok(false)` is a plain mismatch. An error means the stored hash itself is
/// unusable.
pub fn verify_password(hash: &str, plaintext: &[u8]) -> Result<bool, FroskError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| FroskError::CorruptedRecord(format!("master password hash: {e}")))?;
    match Argon2::default().verify_password(plaintext, &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(FroskError::Primitive(format!(
            "password verification failed: {e}"
        ))),
    }
}
