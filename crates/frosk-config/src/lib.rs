// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the frosk password vault.
//!
//! Strict TOML parsing (`deny_unknown_fields`), an XDG file hierarchy,
//! `FROSK_*` environment overrides, and miette diagnostics with typo
//! suggestions.
//!
//! ```no_run
//! use frosk_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("vault at {}", config.storage.database_path);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{FroskConfig, LoggingConfig, StorageConfig, VaultConfig};

/// Load the layered configuration and validate it.
pub fn load_and_validate() -> Result<FroskConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load from one explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<FroskConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        read_source(path).into_iter().collect()
    })
}

/// Load from a TOML string over the defaults and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<FroskConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

fn finish(
    loaded: Result<FroskConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<FroskConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!(database = %config.storage.database_path, "configuration loaded");
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Contents of every existing file in the lookup hierarchy, for error spans.
fn collect_toml_sources() -> Vec<(String, String)> {
    loader::config_file_paths()
        .iter()
        .filter_map(|p| read_source(p))
        .collect()
}

fn read_source(path: &Path) -> Option<(String, String)> {
    let content = std::fs::read_to_string(path).ok()?;
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|d| d.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    Some((absolute.display().to_string(), content))
}

impl From<ConfigError> for frosk_core::FroskError {
    fn from(err: ConfigError) -> Self {
        frosk_core::FroskError::Config(err.to_string())
    }
}
