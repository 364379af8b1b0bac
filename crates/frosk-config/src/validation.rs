// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde cannot express. All problems are collected.

use crate::diagnostic::ConfigError;
use crate::model::FroskConfig;

/// Lowest accepted PBKDF2 iteration count.
pub const MIN_KDF_ITERATIONS: u32 = 1000;

/// Levels accepted by `[logging] level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration, reporting every failure at once.
pub fn validate_config(config: &FroskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::validation(
            "storage.database_path must not be empty",
        ));
    }

    let vault = &config.vault;
    if vault.kdf_iterations < MIN_KDF_ITERATIONS {
        errors.push(ConfigError::validation(format!(
            "vault.kdf_iterations must be at least {MIN_KDF_ITERATIONS}, got {}",
            vault.kdf_iterations
        )));
    }
    if vault.hash_time_cost < 1 {
        errors.push(ConfigError::validation(
            "vault.hash_time_cost must be at least 1",
        ));
    }
    if vault.hash_parallelism < 1 {
        errors.push(ConfigError::validation(
            "vault.hash_parallelism must be at least 1",
        ));
    }
    // Argon2 requires 8 KiB of memory per lane.
    let min_memory = 8 * vault.hash_parallelism.max(1);
    if vault.hash_memory_cost < min_memory {
        errors.push(ConfigError::validation(format!(
            "vault.hash_memory_cost must be at least {min_memory} KiB for {} lane(s), got {}",
            vault.hash_parallelism, vault.hash_memory_cost
        )));
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "logging.level `{}` is not one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        )));
    }
    if let Some(file) = &config.logging.file {
        if file.trim().is_empty() {
            errors.push(ConfigError::validation(
                "logging.file must not be empty when set",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
