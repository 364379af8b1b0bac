// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master password acquisition: `FROSK_MASTER_PASSWORD` or a TTY prompt.

use frosk_core::FroskError;
use secrecy::SecretString;

/// Environment variable consulted before prompting.
pub const MASTER_PASSWORD_ENV_VAR: &str = "FROSK_MASTER_PASSWORD";

fn from_env() -> Option<SecretString> {
    match std::env::var(MASTER_PASSWORD_ENV_VAR) {
        Ok(value) if !value.is_empty() => Some(SecretString::from(value)),
        _ => None,
    }
}

fn read_hidden(label: &str) -> Result<String, FroskError> {
    eprint!("{label}: ");
    rpassword::read_password()
        .map_err(|e| FroskError::Internal(format!("failed to read master password: {e}")))
}

fn stdin_is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stdin())
}

fn unavailable() -> FroskError {
    FroskError::Internal(format!(
        "no master password available: set {MASTER_PASSWORD_ENV_VAR} or run interactively"
    ))
}

/// Read the master password from the environment, else prompt once.
pub fn get_master_password() -> Result<SecretString, FroskError> {
    if let Some(pw) = from_env() {
        return Ok(pw);
    }
    if !stdin_is_tty() {
        return Err(unavailable());
    }
    let pw = read_hidden("Master password")?;
    if pw.is_empty() {
        return Err(FroskError::EmptyMasterPassword);
    }
    Ok(SecretString::from(pw))
}

/// Like [`get_master_password`], but an interactive entry must be typed twice.
/// Used when creating the vault.
pub fn get_master_password_with_confirm() -> Result<SecretString, FroskError> {
    if let Some(pw) = from_env() {
        return Ok(pw);
    }
    if !stdin_is_tty() {
        return Err(unavailable());
    }
    let first = read_hidden("New master password")?;
    let second = read_hidden("Confirm master password")?;
    if first != second {
        return Err(FroskError::MasterPasswordMismatch);
    }
    if first.is_empty() {
        return Err(FroskError::EmptyMasterPassword);
    }
    Ok(SecretString::from(first))
}
