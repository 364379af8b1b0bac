// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory storage adapter for fast tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use frosk_core::{CredentialRecord, FroskError, HealthStatus, MasterRecord, StorageAdapter};

#[derive(Default)]
struct Tables {
    master: Option<MasterRecord>,
    credentials: BTreeMap<String, CredentialRecord>,
}

/// Both tables behind one async mutex, so each operation is atomic.
///
/// `fail_inserts_with_zero_rows` simulates a backend that accepts an insert
/// without writing anything.
#[derive(Default)]
pub struct MemoryStorage {
    tables: Mutex<Tables>,
    zero_row_inserts: AtomicBool,
    inserts: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later insert report zero affected rows.
    pub fn fail_inserts_with_zero_rows(&self) {
        self.zero_row_inserts.store(true, Ordering::SeqCst);
    }

    /// Number of inserts that reached the tables.
    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    /// Replace a stored credential row verbatim, bypassing constraints.
    pub async fn overwrite_credential(&self, record: CredentialRecord) {
        self.tables
            .lock()
            .await
            .credentials
            .insert(record.service_name.clone(), record);
    }

    fn zero_rows(&self) -> bool {
        self.zero_row_inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorageAdapter for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> Result<HealthStatus, FroskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn close(&self) -> Result<(), FroskError> {
        Ok(())
    }

    async fn count_master(&self) -> Result<u64, FroskError> {
        Ok(u64::from(self.tables.lock().await.master.is_some()))
    }

    async fn insert_master(&self, record: &MasterRecord) -> Result<usize, FroskError> {
        let mut tables = self.tables.lock().await;
        if tables.master.is_some() {
            return Err(FroskError::AlreadyInitialized);
        }
        if self.zero_rows() {
            return Ok(0);
        }
        tables.master = Some(record.clone());
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Ok(1)
    }

    async fn load_master(&self) -> Result<Option<MasterRecord>, FroskError> {
        Ok(self.tables.lock().await.master.clone())
    }

    async fn count_service(&self, service_name: &str) -> Result<u64, FroskError> {
        Ok(u64::from(
            self.tables.lock().await.credentials.contains_key(service_name),
        ))
    }

    async fn insert_credential(&self, record: &CredentialRecord) -> Result<usize, FroskError> {
        let mut tables = self.tables.lock().await;
        if tables.credentials.contains_key(&record.service_name) {
            return Err(FroskError::ServiceNameAlreadyTaken(
                record.service_name.clone(),
            ));
        }
        if self.zero_rows() {
            return Ok(0);
        }
        tables
            .credentials
            .insert(record.service_name.clone(), record.clone());
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Ok(1)
    }

    async fn get_credential(
        &self,
        service_name: &str,
    ) -> Result<Option<CredentialRecord>, FroskError> {
        Ok(self.tables.lock().await.credentials.get(service_name).cloned())
    }

    async fn delete_credential(&self, service_name: &str) -> Result<usize, FroskError> {
        let removed = self.tables.lock().await.credentials.remove(service_name);
        Ok(usize::from(removed.is_some()))
    }

    async fn list_service_names(&self) -> Result<Vec<String>, FroskError> {
        // BTreeMap keys are already sorted.
        Ok(self.tables.lock().await.credentials.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str) -> CredentialRecord {
        CredentialRecord {
            service_name: name.to_string(),
            encrypted_username: String::new(),
            username_nonce: String::new(),
            encrypted_password: String::new(),
            password_nonce: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[tokio::test]
    async fn duplicate_names_conflict() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.insert_credential(&row("a")).await.unwrap(), 1);
        assert!(matches!(
            storage.insert_credential(&row("a")).await,
            Err(FroskError::ServiceNameAlreadyTaken(_))
        ));
        assert_eq!(storage.insert_count(), 1);
    }

    #[tokio::test]
    async fn listing_is_sorted() {
        let storage = MemoryStorage::new();
        for name in ["c", "a", "b"] {
            storage.insert_credential(&row(name)).await.unwrap();
        }
        assert_eq!(storage.list_service_names().await.unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn zero_row_mode_writes_nothing() {
        let storage = MemoryStorage::new();
        storage.fail_inserts_with_zero_rows();
        assert_eq!(storage.insert_credential(&row("a")).await.unwrap(), 0);
        assert_eq!(storage.count_service("a").await.unwrap(), 0);
    }
}
