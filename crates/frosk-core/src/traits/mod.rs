// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the persistence seam.

pub mod storage;

pub use storage::StorageAdapter;
