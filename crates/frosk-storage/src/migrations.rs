// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded schema migrations (refinery). SQL lives in `migrations/`.

use frosk_core::FroskError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Apply every pending migration. Applied versions are tracked by refinery.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), FroskError> {
    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(|e| FroskError::storage("running migrations", e))?;
    for migration in report.applied_migrations() {
        tracing::info!(version = migration.version(), name = migration.name(), "applied migration");
    }
    Ok(())
}
