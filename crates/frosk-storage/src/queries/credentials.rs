// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential row operations, keyed by exact service name.

use frosk_core::{CredentialRecord, FroskError};
use rusqlite::params;

use crate::database::{Database, map_tr_err};
use crate::queries::{InsertOutcome, constrained_insert};

/// Number of rows with exactly this service name (0 or 1).
pub async fn count_service(db: &Database, service_name: &str) -> Result<u64, FroskError> {
    let service_name = service_name.to_string();
    db.connection()
        .call(move |conn| -> Result<u64, rusqlite::Error> {
            conn.query_row(
                "SELECT COUNT(*) FROM credentials WHERE service_name = ?1",
                params![service_name],
                |row| row.get(0),
            )
        })
        .await
        .map_err(|e| map_tr_err("counting service rows", e))
}

/// Insert a credential row.
///
/// The UNIQUE constraint on `service_name` is the authoritative duplicate
/// check: a violation becomes [`FroskError::ServiceNameAlreadyTaken`].
pub async fn insert_credential(
    db: &Database,
    record: &CredentialRecord,
) -> Result<usize, FroskError> {
    let r = record.clone();
    let outcome = db
        .connection()
        .call(move |conn| {
            constrained_insert(conn.execute(
                "INSERT INTO credentials (service_name, encrypted_username, username_nonce,
                                          encrypted_password, password_nonce,
                                          created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    r.service_name,
                    r.encrypted_username,
                    r.username_nonce,
                    r.encrypted_password,
                    r.password_nonce,
                    r.created_at,
                    r.updated_at,
                ],
            ))
        })
        .await
        .map_err(|e| map_tr_err("inserting credential", e))?;

    match outcome {
        InsertOutcome::Inserted(rows) => Ok(rows),
        InsertOutcome::Conflict => Err(FroskError::ServiceNameAlreadyTaken(
            record.service_name.clone(),
        )),
    }
}

/// Fetch one credential row by service name.
pub async fn get_credential(
    db: &Database,
    service_name: &str,
) -> Result<Option<CredentialRecord>, FroskError> {
    let service_name = service_name.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<CredentialRecord>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT service_name, encrypted_username, username_nonce,
                        encrypted_password, password_nonce, created_at, updated_at
                 FROM credentials WHERE service_name = ?1",
            )?;
            let result = stmt.query_row(params![service_name], |row| {
                Ok(CredentialRecord {
                    service_name: row.get(0)?,
                    encrypted_username: row.get(1)?,
                    username_nonce: row.get(2)?,
                    encrypted_password: row.get(3)?,
                    password_nonce: row.get(4)?,
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            });
            match result {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(|e| map_tr_err("fetching credential", e))
}

/// Delete one credential row, returning the number of rows removed.
pub async fn delete_credential(db: &Database, service_name: &str) -> Result<usize, FroskError> {
    let service_name = service_name.to_string();
    db.connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute(
                "DELETE FROM credentials WHERE service_name = ?1",
                params![service_name],
            )
        })
        .await
        .map_err(|e| map_tr_err("deleting credential", e))
}

/// Every stored service name, ordered by name.
pub async fn list_service_names(db: &Database) -> Result<Vec<String>, FroskError> {
    db.connection()
        .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
            let mut stmt = conn.prepare("SELECT service_name FROM credentials ORDER BY service_name")?;
            let rows = stmt.query_map([], |row| row.get(0))?;
            let mut names = Vec::new();
            for row in rows {
                names.push(row?);
            }
            Ok(names)
        })
        .await
        .map_err(|e| map_tr_err("listing service names", e))
}
