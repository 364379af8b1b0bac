// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the frosk password vault.
//!
//! This crate provides the error taxonomy, the persisted record types, and
//! the [`StorageAdapter`] trait that every persistence backend implements.
//! It carries no cryptography and no global state.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{ErrorKind, FroskError};
pub use traits::StorageAdapter;
pub use types::{CredentialRecord, HealthStatus, MasterRecord, VaultState};
