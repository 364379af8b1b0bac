// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for the frosk password vault.
//!
//! WAL-mode SQLite with embedded migrations and a single writer through
//! `tokio-rusqlite`. Uniqueness of the master row and of service names is
//! enforced by table constraints and reported as conflict errors.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
