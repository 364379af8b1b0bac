// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master row operations. The table holds at most one row (`id = 1`).

use frosk_core::{FroskError, MasterRecord};
use rusqlite::params;

use crate::database::{Database, map_tr_err};
use crate::queries::{InsertOutcome, constrained_insert};

/// Number of master rows, 0 or 1.
pub async fn count_master(db: &Database) -> Result<u64, FroskError> {
    db.connection()
        .call(|conn| -> Result<u64, rusqlite::Error> {
            conn.query_row("SELECT COUNT(*) FROM master", [], |row| row.get(0))
        })
        .await
        .map_err(|e| map_tr_err("counting master rows", e))
}

/// Insert the singleton master row.
///
/// Fails with [`FroskError::AlreadyInitialized`] if a row is already present.
pub async fn insert_master(db: &Database, record: &MasterRecord) -> Result<usize, FroskError> {
    let r = record.clone();
    let outcome = db
        .connection()
        .call(move |conn| {
            constrained_insert(conn.execute(
                "INSERT INTO master (id, password_hash, wrapped_data_key, salt, wrap_nonce,
                                     kdf_iterations, created_at, updated_at)
                 VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    r.password_hash,
                    r.wrapped_data_key,
                    r.salt,
                    r.wrap_nonce,
                    r.kdf_iterations,
                    r.created_at,
                    r.updated_at,
                ],
            ))
        })
        .await
        .map_err(|e| map_tr_err("inserting master row", e))?;

    match outcome {
        InsertOutcome::Inserted(rows) => Ok(rows),
        InsertOutcome::Conflict => Err(FroskError::AlreadyInitialized),
    }
}

/// Load the master row, if the vault has been initialized.
pub async fn load_master(db: &Database) -> Result<Option<MasterRecord>, FroskError> {
    db.connection()
        .call(|conn| -> Result<Option<MasterRecord>, rusqlite::Error> {
            let result = conn.query_row(
                "SELECT password_hash, wrapped_data_key, salt, wrap_nonce, kdf_iterations,
                        created_at, updated_at
                 FROM master WHERE id = 1",
                [],
                |row| {
                    Ok(MasterRecord {
                        password_hash: row.get(0)?,
                        wrapped_data_key: row.get(1)?,
                        salt: row.get(2)?,
                        wrap_nonce: row.get(3)?,
                        kdf_iterations: row.get(4)?,
                        created_at: row.get(5)?,
                        updated_at: row.get(6)?,
                    })
                },
            );
            match result {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(|e| map_tr_err("loading master row", e))
}
