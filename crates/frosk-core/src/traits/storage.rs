// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for persistence backends (SQLite, in-memory).

use async_trait::async_trait;

use crate::error::FroskError;
use crate::types::{CredentialRecord, HealthStatus, MasterRecord};

/// Durable row storage over the `master` and `credentials` tables.
///
/// Implementations own the rows; callers only borrow them for the duration
/// of one operation. Records are opaque encoded text to the adapter.
///
/// Constraint contract:
/// - at most one master row may ever exist; a second insert fails with
///   [`FroskError::AlreadyInitialized`];
/// - `service_name` is unique; a duplicate insert fails with
///   [`FroskError::ServiceNameAlreadyTaken`]. This constraint, not a prior
///   count, is the authoritative conflict signal.
#[async_trait]
pub trait StorageAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this backend.
    fn name(&self) -> &str;

    /// Performs a health check and returns the backend's current status.
    async fn health_check(&self) -> Result<HealthStatus, FroskError>;

    /// Flushes pending writes and releases the backend's resources.
    async fn close(&self) -> Result<(), FroskError>;

    /// Number of master rows (0 or 1).
    async fn count_master(&self) -> Result<u64, FroskError>;

    /// Insert the master row, returning the number of rows affected.
    async fn insert_master(&self, record: &MasterRecord) -> Result<usize, FroskError>;

    /// Load the master row, if any.
    async fn load_master(&self) -> Result<Option<MasterRecord>, FroskError>;

    /// Number of credential rows with exactly this service name.
    async fn count_service(&self, service_name: &str) -> Result<u64, FroskError>;

    /// Insert a credential row, returning the number of rows affected.
    async fn insert_credential(&self, record: &CredentialRecord) -> Result<usize, FroskError>;

    /// Fetch a credential row by exact service name.
    async fn get_credential(
        &self,
        service_name: &str,
    ) -> Result<Option<CredentialRecord>, FroskError>;

    /// Delete a credential row, returning the number of rows removed.
    async fn delete_credential(&self, service_name: &str) -> Result<usize, FroskError>;

    /// All service names, ordered by name. Each call runs a fresh query.
    async fn list_service_names(&self) -> Result<Vec<String>, FroskError>;
}
