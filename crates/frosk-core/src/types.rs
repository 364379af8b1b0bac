// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted record types and small shared enums.
//!
//! All binary material (hashes aside) is carried as standard base64 text so
//! that any textual store can hold it unchanged.

use serde::{Deserialize, Serialize};
use strum::Display;

/// The singleton row protecting the vault's data encryption key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterRecord {
    /// Self-contained PHC hash of the master password (authentication only).
    pub password_hash: String,
    /// Base64 of the DEK sealed under the password-derived wrapping key.
    pub wrapped_data_key: String,
    /// Base64 of the 16-byte KDF salt.
    pub salt: String,
    /// Base64 of the 12-byte nonce used to wrap the DEK.
    pub wrap_nonce: String,
    /// PBKDF2 iteration count in effect when the vault was created.
    pub kdf_iterations: u32,
    pub created_at: String,
    pub updated_at: String,
}

/// One stored credential. Username and password are sealed independently,
/// each under its own nonce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub service_name: String,
    pub encrypted_username: String,
    pub username_nonce: String,
    pub encrypted_password: String,
    pub password_nonce: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Whether a master password has been set for this vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum VaultState {
    Uninitialized,
    Initialized,
}

/// Health status reported by storage health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Backend is fully operational.
    Healthy,
    /// Backend is operational but experiencing issues.
    Degraded(String),
    /// Backend is not operational.
    Unhealthy(String),
}
