// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracing subscriber setup.
//!
//! Human-readable events go to stderr so stdout carries only command output.
//! With `[logging] file` set, events are also appended to that file, as JSON
//! lines when `[logging] json` is true.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use frosk_config::LoggingConfig;
use frosk_core::FroskError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Default filter directive when `RUST_LOG` is unset.
fn default_directive(level: &str) -> String {
    format!("frosk={},warn", level.to_ascii_lowercase())
}

pub fn init_tracing(config: &LoggingConfig) -> Result<(), FroskError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.level)));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false);

    let file_layer = match &config.file {
        Some(path) => {
            let path = Path::new(path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    FroskError::Config(format!("cannot create log directory {}: {e}", parent.display()))
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    FroskError::Config(format!("cannot open log file {}: {e}", path.display()))
                })?;
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false);
            if config.json {
                Some(layer.json().boxed())
            } else {
                Some(layer.boxed())
            }
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| FroskError::Internal(format!("failed to install tracing subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_scopes_level_to_frosk_crates() {
        assert_eq!(default_directive("DEBUG"), "frosk=debug,warn");
        assert_eq!(default_directive("info"), "frosk=info,warn");
    }
}
