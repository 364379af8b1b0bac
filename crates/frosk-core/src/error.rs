// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the frosk password vault.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Coarse classification of every [`FroskError`].
///
/// Callers (GUI, CLI) branch on the kind rather than on individual variants
/// when deciding how to present a failure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum ErrorKind {
    /// Empty or otherwise unusable input. Reported before any I/O or crypto.
    Validation,
    /// The master password does not match the stored hash.
    Authentication,
    /// AEAD tag mismatch or undecodable persisted data.
    Integrity,
    /// A uniqueness constraint rejected the write.
    Conflict,
    /// The requested record does not exist.
    NotFound,
    /// Bugs, primitive failures, and storage faults.
    Internal,
}

/// The error type returned by every vault, storage, and config operation.
#[derive(Debug, Error)]
pub enum FroskError {
    #[error("no service name given")]
    EmptyServiceName,

    #[error("no password given")]
    EmptyPassword,

    #[error("no username given")]
    EmptyUsername,

    #[error("no master password given")]
    EmptyMasterPassword,

    /// Expected user-input outcome, never a system fault.
    #[error("master password does not match the stored signature")]
    MasterPasswordMismatch,

    /// Wrong key and tampered ciphertext are deliberately indistinguishable.
    #[error("decryption failed while {context} -- wrong master password or corrupted data")]
    DecryptionFailed { context: String },

    /// A persisted field could not be decoded (bad base64, wrong length, bad UTF-8).
    #[error("corrupted record: {0}")]
    CorruptedRecord(String),

    #[error("service name `{0}` is already present in the vault")]
    ServiceNameAlreadyTaken(String),

    #[error("vault is already initialized with a master password")]
    AlreadyInitialized,

    #[error("service name `{0}` is not present in the vault")]
    ServiceNameNotFound(String),

    #[error("vault is not initialized -- set a master password first")]
    NotInitialized,

    /// A write affected an unexpected number of rows.
    #[error("persistence invariant violated: {0}")]
    PersistenceInvariantViolation(String),

    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// RNG, hashing, or KDF failure.
    #[error("crypto primitive failure: {0}")]
    Primitive(String),

    /// Storage backend errors (connection, query, migration).
    #[error("storage error while {context}: {source}")]
    Storage {
        context: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors (invalid TOML, failed validation).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors (e.g. a panicked worker task).
    #[error("internal error: {0}")]
    Internal(String),
}

impl FroskError {
    /// Build a [`FroskError::Storage`] from any error with an operation label.
    pub fn storage(
        context: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Storage {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Build a [`FroskError::DecryptionFailed`] with an operation label.
    pub fn decryption(context: impl Into<String>) -> Self {
        Self::DecryptionFailed {
            context: context.into(),
        }
    }

    /// Classify this error into the closed [`ErrorKind`] set.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyServiceName
            | Self::EmptyPassword
            | Self::EmptyUsername
            | Self::EmptyMasterPassword => ErrorKind::Validation,
            Self::MasterPasswordMismatch => ErrorKind::Authentication,
            Self::DecryptionFailed { .. } | Self::CorruptedRecord(_) => ErrorKind::Integrity,
            Self::ServiceNameAlreadyTaken(_) | Self::AlreadyInitialized => ErrorKind::Conflict,
            Self::ServiceNameNotFound(_) | Self::NotInitialized => ErrorKind::NotFound,
            Self::PersistenceInvariantViolation(_)
            | Self::InvalidKeyLength { .. }
            | Self::Primitive(_)
            | Self::Storage { .. }
            | Self::Config(_)
            | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// True for outcomes a user can correct (bad input, wrong password,
    /// name conflicts, missing records).
    pub fn is_expected(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Validation
                | ErrorKind::Authentication
                | ErrorKind::Conflict
                | ErrorKind::NotFound
        )
    }
}
