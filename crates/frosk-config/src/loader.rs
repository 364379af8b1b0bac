// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Merge order, later wins: compiled defaults, `/etc/frosk/frosk.toml`,
//! `$XDG_CONFIG_HOME/frosk/frosk.toml`, `./frosk.toml`, then `FROSK_*`
//! environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::FroskConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/frosk/frosk.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "frosk.toml";

/// Per-user configuration file under the XDG config directory, if one exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("frosk").join("frosk.toml"))
}

/// Every file in the lookup hierarchy, lowest precedence first.
pub fn config_file_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG_PATH)];
    if let Some(user) = user_config_path() {
        paths.push(user);
    }
    paths.push(PathBuf::from(LOCAL_CONFIG_FILE));
    paths
}

/// Build the full layered Figment without extracting it.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(FroskConfig::default()));
    for path in config_file_paths() {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_provider())
}

/// Load configuration from the standard hierarchy.
pub fn load_config() -> Result<FroskConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from an explicit file, still honouring `FROSK_*` overrides.
pub fn load_config_from_path(path: &Path) -> Result<FroskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FroskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string over the defaults. No env lookup.
pub fn load_config_from_str(toml_content: &str) -> Result<FroskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FroskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// `FROSK_<SECTION>_<KEY>` maps to `<section>.<key>`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `FROSK_STORAGE_DATABASE_PATH` lands on `storage.database_path`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("FROSK_")
        .ignore(&["MASTER_PASSWORD"])
        .map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    // Figment hands the key over with its original case.
    let key = key.to_ascii_lowercase();
    for section in ["storage", "vault", "logging"] {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key
}
