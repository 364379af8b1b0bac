// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row-level behavior of the SQLite adapter: constraints, lookups, ordering.

use std::sync::Arc;

use frosk_config::StorageConfig;
use frosk_core::{CredentialRecord, FroskError, MasterRecord, StorageAdapter};
use frosk_storage::SqliteStorage;
use tempfile::TempDir;

async fn open_storage() -> (TempDir, SqliteStorage) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = StorageConfig {
        database_path: dir.path().join("vault.db").display().to_string(),
        wal_mode: true,
        busy_timeout_ms: 2000,
    };
    let storage = SqliteStorage::open(config).await.expect("open storage");
    (dir, storage)
}

fn master() -> MasterRecord {
    MasterRecord {
        password_hash: "$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA".to_string(),
        wrapped_data_key: "d3JhcHBlZA==".to_string(),
        salt: "c2FsdHNhbHRzYWx0c2FsdA==".to_string(),
        wrap_nonce: "bm9uY2Vub25jZQ==".to_string(),
        kdf_iterations: 4096,
        created_at: "2026-01-01 00:00:00".to_string(),
        updated_at: "2026-01-01 00:00:00".to_string(),
    }
}

fn credential(service: &str) -> CredentialRecord {
    CredentialRecord {
        service_name: service.to_string(),
        encrypted_username: "dXNlcg==".to_string(),
        username_nonce: "bm9uY2Ux".to_string(),
        encrypted_password: "cGFzcw==".to_string(),
        password_nonce: "bm9uY2Uy".to_string(),
        created_at: "2026-01-01 00:00:00".to_string(),
        updated_at: "2026-01-01 00:00:00".to_string(),
    }
}

#[tokio::test]
async fn master_row_is_a_singleton() {
    let (_dir, storage) = open_storage().await;
    assert_eq!(storage.count_master().await.unwrap(), 0);
    assert!(storage.load_master().await.unwrap().is_none());

    assert_eq!(storage.insert_master(&master()).await.unwrap(), 1);
    assert_eq!(storage.count_master().await.unwrap(), 1);
    assert_eq!(storage.load_master().await.unwrap(), Some(master()));

    let second = storage.insert_master(&master()).await;
    assert!(matches!(second, Err(FroskError::AlreadyInitialized)), "got {second:?}");
    assert_eq!(storage.count_master().await.unwrap(), 1);
}

#[tokio::test]
async fn duplicate_service_is_rejected_by_constraint() {
    let (_dir, storage) = open_storage().await;
    storage.insert_credential(&credential("github")).await.unwrap();

    let dup = storage.insert_credential(&credential("github")).await;
    match dup {
        Err(FroskError::ServiceNameAlreadyTaken(name)) => assert_eq!(name, "github"),
        other => panic!("expected ServiceNameAlreadyTaken, got {other:?}"),
    }
    assert_eq!(storage.count_service("github").await.unwrap(), 1);
}

#[tokio::test]
async fn service_lookup_is_exact_match() {
    let (_dir, storage) = open_storage().await;
    storage.insert_credential(&credential("GitHub")).await.unwrap();

    assert!(storage.get_credential("github").await.unwrap().is_none());
    assert_eq!(storage.count_service("github").await.unwrap(), 0);
    let found = storage.get_credential("GitHub").await.unwrap().unwrap();
    assert_eq!(found, credential("GitHub"));
}

#[tokio::test]
async fn delete_reports_rows_removed() {
    let (_dir, storage) = open_storage().await;
    storage.insert_credential(&credential("mail")).await.unwrap();

    assert_eq!(storage.delete_credential("mail").await.unwrap(), 1);
    assert_eq!(storage.delete_credential("mail").await.unwrap(), 0);
    assert!(storage.get_credential("mail").await.unwrap().is_none());
}

#[tokio::test]
async fn listing_is_ordered_and_fresh() {
    let (_dir, storage) = open_storage().await;
    for name in ["zeta", "alpha", "mu"] {
        storage.insert_credential(&credential(name)).await.unwrap();
    }
    let first = storage.list_service_names().await.unwrap();
    let second = storage.list_service_names().await.unwrap();
    assert_eq!(first, vec!["alpha", "mu", "zeta"]);
    assert_eq!(first, second);

    storage.delete_credential("mu").await.unwrap();
    assert_eq!(storage.list_service_names().await.unwrap(), vec!["alpha", "zeta"]);
}

#[tokio::test]
async fn concurrent_inserts_of_one_name_yield_one_row() {
    let (_dir, storage) = open_storage().await;
    let storage = Arc::new(storage);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let storage = Arc::clone(&storage);
            tokio::spawn(async move { storage.insert_credential(&credential("race")).await })
        })
        .collect();

    let mut inserted = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(1) => inserted += 1,
            Err(FroskError::ServiceNameAlreadyTaken(_)) => conflicts += 1,
            other => panic!("unexpected outcome {other:?}"),
        }
    }
    assert_eq!(inserted, 1);
    assert_eq!(conflicts, 7);
    assert_eq!(storage.count_service("race").await.unwrap(), 1);
}

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        database_path: dir.path().join("persist.db").display().to_string(),
        wal_mode: true,
        busy_timeout_ms: 2000,
    };

    let storage = SqliteStorage::open(config.clone()).await.unwrap();
    storage.insert_master(&master()).await.unwrap();
    storage.insert_credential(&credential("kept")).await.unwrap();
    storage.close().await.unwrap();
    drop(storage);

    let reopened = SqliteStorage::open(config).await.unwrap();
    assert_eq!(reopened.count_master().await.unwrap(), 1);
    assert_eq!(reopened.list_service_names().await.unwrap(), vec!["kept"]);
}
