// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for frosk.
//!
//! - [`MemoryStorage`]: an in-memory [`StorageAdapter`](frosk_core::StorageAdapter)
//!   with the same uniqueness rules as the SQLite schema
//! - [`TestVault`]: a vault with cheap KDF parameters over either backend

pub mod fixtures;
pub mod memory;

pub use fixtures::{MASTER_PASSWORD, TestVault, cheap_vault_config, secret};
pub use memory::MemoryStorage;
