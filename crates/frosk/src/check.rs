// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `frosk check` command implementation.
//!
//! Runs diagnostic checks against the configuration and the vault database
//! without asking for the master password.

use std::io::{IsTerminal, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use frosk_config::FroskConfig;
use frosk_core::{FroskError, HealthStatus, VaultState};
use frosk_vault::Vault;
use frosk_vault::kdf::DEFAULT_ITERATIONS;

/// Status of a diagnostic check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &'static str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name,
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `frosk check` command.
///
/// Fails when any check fails; warnings are only printed.
pub async fn run_check(
    config: &FroskConfig,
    vault: &Vault,
    plain: bool,
    out: &mut impl Write,
) -> Result<(), FroskError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let mut results = vec![check_key_stretching(config)];
    let db_path = Path::new(&config.storage.database_path);
    if db_path.exists() {
        results.push(check_database(vault).await);
        results.push(check_vault_state(vault).await);
    } else {
        let start = Instant::now();
        results.push(CheckResult::new(
            "Database",
            CheckStatus::Warn,
            format!("not found: {} (created by `frosk init`)", db_path.display()),
            start,
        ));
    }

    let write = |e: std::io::Error| FroskError::Internal(format!("failed to write output: {e}"));
    writeln!(out).map_err(write)?;
    writeln!(out, "  frosk check").map_err(write)?;
    writeln!(out, "  {}", "-".repeat(50)).map_err(write)?;
    for result in &results {
        writeln!(out, "{}", render_line(result, use_color)).map_err(write)?;
    }
    writeln!(out).map_err(write)?;

    let failed = count(&results, CheckStatus::Fail);
    let issues = failed + count(&results, CheckStatus::Warn);
    if issues == 0 {
        writeln!(out, "  All checks passed.").map_err(write)?;
    } else {
        let word = if issues == 1 { "issue" } else { "issues" };
        writeln!(out, "  {issues} {word} found.").map_err(write)?;
    }
    writeln!(out).map_err(write)?;

    if failed > 0 {
        return Err(FroskError::Internal(format!("{failed} check(s) failed")));
    }
    Ok(())
}

fn count(results: &[CheckResult], status: CheckStatus) -> usize {
    results.iter().filter(|r| r.status == status).count()
}

fn render_line(result: &CheckResult, use_color: bool) -> String {
    let ms = result.duration.as_millis();
    if !use_color {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        return format!("    {tag} {:<20} {} ({ms}ms)", result.name, result.message);
    }

    use colored::Colorize;
    let (symbol, message) = match result.status {
        CheckStatus::Pass => ("✓".green(), result.message.normal()),
        CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
        CheckStatus::Fail => ("✗".red(), result.message.red()),
    };
    format!("    {symbol} {:<20} {message} ({ms}ms)", result.name)
}

fn check_key_stretching(config: &FroskConfig) -> CheckResult {
    let start = Instant::now();
    let iterations = config.vault.kdf_iterations;
    if iterations < DEFAULT_ITERATIONS {
        CheckResult::new(
            "Key stretching",
            CheckStatus::Warn,
            format!("{iterations} PBKDF2 iterations (default is {DEFAULT_ITERATIONS})"),
            start,
        )
    } else {
        CheckResult::new(
            "Key stretching",
            CheckStatus::Pass,
            format!("{iterations} PBKDF2 iterations"),
            start,
        )
    }
}

async fn check_database(vault: &Vault) -> CheckResult {
    let start = Instant::now();
    match vault.health_check().await {
        Ok(HealthStatus::Healthy) => {
            CheckResult::new("Database", CheckStatus::Pass, "connected", start)
        }
        Ok(HealthStatus::Degraded(reason)) => {
            CheckResult::new("Database", CheckStatus::Warn, reason, start)
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            CheckResult::new("Database", CheckStatus::Fail, reason, start)
        }
        Err(e) => CheckResult::new("Database", CheckStatus::Fail, e.to_string(), start),
    }
}

async fn check_vault_state(vault: &Vault) -> CheckResult {
    let start = Instant::now();
    match vault.state().await {
        Ok(VaultState::Initialized) => {
            CheckResult::new("Master password", CheckStatus::Pass, "set", start)
        }
        Ok(VaultState::Uninitialized) => CheckResult::new(
            "Master password",
            CheckStatus::Warn,
            "not set (run `frosk init`)",
            start,
        ),
        Err(e) => CheckResult::new("Master password", CheckStatus::Fail, e.to_string(), start),
    }
}
