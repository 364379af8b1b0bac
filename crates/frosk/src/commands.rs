// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault subcommands. Each writes its user-facing output to `out`; prompting
//! for the master password happens before these are called.

use std::io::{BufRead, IsTerminal, Write};

use frosk_core::FroskError;
use frosk_vault::{Vault, generate_password, mask_secret};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::info;

fn io_err(e: std::io::Error) -> FroskError {
    FroskError::Internal(format!("failed to write output: {e}"))
}

/// `frosk init`
pub async fn init(
    vault: &Vault,
    master: &SecretString,
    database_path: &str,
    out: &mut impl Write,
) -> Result<(), FroskError> {
    vault.initialize(master).await?;
    info!(path = %database_path, "vault created");
    writeln!(out, "Vault created at {database_path}").map_err(io_err)
}

/// `frosk add`
pub async fn add(
    vault: &Vault,
    service: &str,
    username: &str,
    password: &SecretString,
    master: &SecretString,
    out: &mut impl Write,
) -> Result<(), FroskError> {
    vault
        .add_credential(service, username, password, master)
        .await?;
    writeln!(
        out,
        "Stored credential for `{service}` (password {})",
        mask_secret(password.expose_secret())
    )
    .map_err(io_err)
}

/// `frosk get`
pub async fn get(
    vault: &Vault,
    service: &str,
    master: &SecretString,
    show: bool,
    out: &mut impl Write,
) -> Result<(), FroskError> {
    let credential = vault.get_credential(service, master).await?;
    let password = if show {
        credential.password.expose_secret().to_string()
    } else {
        mask_secret(credential.password.expose_secret())
    };
    writeln!(out, "service:  {}", credential.service_name).map_err(io_err)?;
    writeln!(out, "username: {}", credential.username).map_err(io_err)?;
    writeln!(out, "password: {password}").map_err(io_err)?;
    writeln!(out, "created:  {}", credential.created_at).map_err(io_err)
}

#[derive(Serialize)]
struct ServiceList<'a> {
    services: &'a [String],
}

/// `frosk list`
pub async fn list(vault: &Vault, json: bool, out: &mut impl Write) -> Result<(), FroskError> {
    let services = vault.list_services().await?;
    if json {
        let body = serde_json::to_string_pretty(&ServiceList {
            services: &services,
        })
        .map_err(|e| FroskError::Internal(format!("failed to serialize service list: {e}")))?;
        return writeln!(out, "{body}").map_err(io_err);
    }
    if services.is_empty() {
        return writeln!(out, "No credentials stored.").map_err(io_err);
    }
    for name in &services {
        writeln!(out, "{name}").map_err(io_err)?;
    }
    Ok(())
}

/// `frosk delete`, after confirmation.
pub async fn delete(vault: &Vault, service: &str, out: &mut impl Write) -> Result<(), FroskError> {
    vault.delete_credential(service).await?;
    writeln!(out, "Deleted credential for `{service}`").map_err(io_err)
}

pub fn aborted(out: &mut impl Write) -> Result<(), FroskError> {
    writeln!(out, "Aborted.").map_err(io_err)
}

/// `frosk generate`
pub fn generate(length: usize, include_special: bool, out: &mut impl Write) -> Result<(), FroskError> {
    let password = generate_password(length, include_special)?;
    writeln!(out, "{password}").map_err(io_err)
}

pub fn generated_secret(length: usize, include_special: bool) -> Result<SecretString, FroskError> {
    generate_password(length, include_special).map(SecretString::from)
}

/// Prompt for the password to store. Without a TTY, one line is read from
/// stdin so the command can be scripted.
pub fn read_credential_password(service: &str) -> Result<SecretString, FroskError> {
    let read = if std::io::stdin().is_terminal() {
        rpassword::prompt_password(format!("Password for {service}: "))
    } else {
        read_line()
    };
    read.map(SecretString::from)
        .map_err(|e| FroskError::Internal(format!("failed to read password: {e}")))
}

/// Ask a yes/no question on stderr. Anything but `y`/`yes` is a no.
pub fn confirm(question: &str) -> Result<bool, FroskError> {
    eprint!("{question} [y/N] ");
    let answer =
        read_line().map_err(|e| FroskError::Internal(format!("failed to read answer: {e}")))?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn read_line() -> std::io::Result<String> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use frosk_test_utils::{MASTER_PASSWORD, TestVault, secret};

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[tokio::test]
    async fn init_reports_the_database_path() {
        let tv = TestVault::builder().build().await.unwrap();
        let mut out = Vec::new();
        init(&tv.vault, &secret(MASTER_PASSWORD), "/tmp/frosk.db", &mut out)
            .await
            .unwrap();
        assert_eq!(text(out), "Vault created at /tmp/frosk.db\n");
        assert!(tv.vault.is_initialized().await.unwrap());
    }

    #[tokio::test]
    async fn add_masks_the_stored_password() {
        let tv = TestVault::initialized().await.unwrap();
        let mut out = Vec::new();
        add(
            &tv.vault,
            "github",
            "alice",
            &secret("a-long-generated-password"),
            &secret(MASTER_PASSWORD),
            &mut out,
        )
        .await
        .unwrap();
        let printed = text(out);
        assert!(printed.contains("a-lo...word"), "{printed}");
        assert!(!printed.contains("a-long-generated-password"));
    }

    #[tokio::test]
    async fn get_masks_unless_shown() {
        let tv = TestVault::initialized().await.unwrap();
        tv.add("github", "alice", "p@ss1").await.unwrap();

        let mut masked = Vec::new();
        get(&tv.vault, "github", &secret(MASTER_PASSWORD), false, &mut masked)
            .await
            .unwrap();
        let masked = text(masked);
        assert!(masked.contains("username: alice"));
        assert!(masked.contains("password: ****"));
        assert!(!masked.contains("p@ss1"));

        let mut shown = Vec::new();
        get(&tv.vault, "github", &secret(MASTER_PASSWORD), true, &mut shown)
            .await
            .unwrap();
        assert!(text(shown).contains("password: p@ss1"));
    }

    #[tokio::test]
    async fn list_plain_and_json() {
        let tv = TestVault::initialized().await.unwrap();

        let mut empty = Vec::new();
        list(&tv.vault, false, &mut empty).await.unwrap();
        assert_eq!(text(empty), "No credentials stored.\n");

        tv.add("mail", "me", "pw").await.unwrap();
        tv.add("bank", "me", "pw").await.unwrap();

        let mut plain = Vec::new();
        list(&tv.vault, false, &mut plain).await.unwrap();
        assert_eq!(text(plain), "bank\nmail\n");

        let mut json = Vec::new();
        list(&tv.vault, true, &mut json).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["services"], serde_json::json!(["bank", "mail"]));
    }

    #[tokio::test]
    async fn delete_missing_service_is_not_found() {
        let tv = TestVault::initialized().await.unwrap();
        let mut out = Vec::new();
        let err = delete(&tv.vault, "ghost", &mut out).await.unwrap_err();
        assert!(matches!(err, FroskError::ServiceNameNotFound(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn generate_prints_one_line_of_requested_length() {
        let mut out = Vec::new();
        generate(24, false, &mut out).unwrap();
        let line = text(out);
        assert_eq!(line.trim_end().len(), 24);
        assert!(line.trim_end().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn yes_answers() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES \n"));
        assert!(!is_yes(""));
        assert!(!is_yes("nope"));
    }
}
