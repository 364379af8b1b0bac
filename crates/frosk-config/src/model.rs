// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model for frosk.
//!
//! Every struct rejects unknown keys so a typo in `frosk.toml` fails loudly at
//! startup instead of silently falling back to a default.

use serde::{Deserialize, Serialize};

/// Top-level frosk configuration. All sections are optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FroskConfig {
    /// Where and how the vault database is kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Cost parameters for password hashing and key derivation.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Log level and optional log file.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// SQLite storage configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the vault database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL journaling.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,

    /// How long a writer waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("frosk").join("frosk.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("frosk.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

/// Cryptographic cost parameters.
///
/// `kdf_iterations` only applies to vaults created after it changes: the
/// count in effect at creation is persisted next to the salt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// PBKDF2-HMAC-SHA256 iterations for the key-wrapping key.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Argon2id passes over memory when hashing the master password.
    #[serde(default = "default_hash_time_cost")]
    pub hash_time_cost: u32,

    /// Argon2id memory in KiB.
    #[serde(default = "default_hash_memory_cost")]
    pub hash_memory_cost: u32,

    /// Argon2id lanes.
    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            kdf_iterations: default_kdf_iterations(),
            hash_time_cost: default_hash_time_cost(),
            hash_memory_cost: default_hash_memory_cost(),
            hash_parallelism: default_hash_parallelism(),
        }
    }
}

fn default_kdf_iterations() -> u32 {
    4096
}

fn default_hash_time_cost() -> u32 {
    3
}

fn default_hash_memory_cost() -> u32 {
    19 * 1024
}

fn default_hash_parallelism() -> u32 {
    1
}

/// Logging configuration. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Append log events to this file in addition to stderr.
    #[serde(default)]
    pub file: Option<String>,

    /// Write file events as JSON lines.
    #[serde(default = "default_log_json")]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            json: default_log_json(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_json() -> bool {
    true
}
