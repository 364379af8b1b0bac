// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query functions over the vault tables.

pub mod credentials;
pub mod master;

/// Result of a constrained insert, decided inside the connection closure.
pub(crate) enum InsertOutcome {
    Inserted(usize),
    Conflict,
}

/// True when `e` is a UNIQUE / PRIMARY KEY / CHECK constraint violation.
pub(crate) fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Run an INSERT, turning a constraint violation into [`InsertOutcome::Conflict`].
pub(crate) fn constrained_insert(
    result: Result<usize, rusqlite::Error>,
) -> Result<InsertOutcome, rusqlite::Error> {
    match result {
        Ok(rows) => Ok(InsertOutcome::Inserted(rows)),
        Err(e) if is_constraint_violation(&e) => Ok(InsertOutcome::Conflict),
        Err(e) => Err(e),
    }
}
