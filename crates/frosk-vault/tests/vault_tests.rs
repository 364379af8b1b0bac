// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end vault behavior over both storage backends.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use frosk_core::{CredentialRecord, FroskError, StorageAdapter, VaultState};
use frosk_test_utils::{MASTER_PASSWORD, TestVault, cheap_vault_config, secret};
use frosk_vault::kdf;
use secrecy::ExposeSecret;

async fn walkthrough(tv: TestVault) {
    let vault = &tv.vault;
    assert_eq!(vault.state().await.unwrap(), VaultState::Uninitialized);

    vault.initialize(&secret(MASTER_PASSWORD)).await.unwrap();
    assert!(matches!(
        vault.initialize(&secret("another-password")).await,
        Err(FroskError::AlreadyInitialized)
    ));
    assert!(vault.authenticate(&secret(MASTER_PASSWORD)).await.unwrap());

    tv.add("github", "alice", "p@ss1").await.unwrap();
    match tv.add("github", "bob", "p@ss2").await {
        Err(FroskError::ServiceNameAlreadyTaken(name)) => assert_eq!(name, "github"),
        other => panic!("expected conflict, got {other:?}"),
    }

    let cred = vault
        .get_credential("github", &secret(MASTER_PASSWORD))
        .await
        .unwrap();
    assert_eq!(cred.service_name, "github");
    assert_eq!(cred.username, "alice");
    assert_eq!(cred.password.expose_secret(), "p@ss1");

    let wrong = vault.get_credential("github", &secret("Tr0ub4dor")).await;
    assert!(matches!(wrong, Err(FroskError::DecryptionFailed { .. })), "got {wrong:?}");

    vault.delete_credential("github").await.unwrap();
    assert!(matches!(
        vault.get_credential("github", &secret(MASTER_PASSWORD)).await,
        Err(FroskError::ServiceNameNotFound(_))
    ));
    assert!(vault.list_services().await.unwrap().is_empty());
}

#[tokio::test]
async fn walkthrough_in_memory() {
    walkthrough(TestVault::builder().build().await.unwrap()).await;
}

#[tokio::test]
async fn walkthrough_on_sqlite() {
    walkthrough(TestVault::builder().with_sqlite().build().await.unwrap()).await;
}

#[tokio::test]
async fn operations_before_initialize_report_not_initialized() {
    let tv = TestVault::builder().build().await.unwrap();
    let err = tv.add("github", "alice", "p@ss1").await.unwrap_err();
    assert!(matches!(err, FroskError::NotInitialized), "got {err:?}");
    assert!(matches!(
        tv.vault.authenticate(&secret(MASTER_PASSWORD)).await,
        Err(FroskError::NotInitialized)
    ));
}

#[tokio::test]
async fn concurrent_adds_of_one_service_store_one_row() {
    let tv = TestVault::builder().with_sqlite().build().await.unwrap();
    tv.vault.initialize(&secret(MASTER_PASSWORD)).await.unwrap();

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let vault = tv.vault.clone();
            tokio::spawn(async move {
                vault
                    .add_credential(
                        "shared",
                        &format!("user{i}"),
                        &secret("pw"),
                        &secret(MASTER_PASSWORD),
                    )
                    .await
            })
        })
        .collect();

    let mut ok = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => ok += 1,
            Err(FroskError::ServiceNameAlreadyTaken(_)) => {}
            Err(other) => panic!("unexpected error {other}"),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(tv.vault.list_services().await.unwrap(), vec!["shared"]);
}

#[tokio::test]
async fn nonces_are_unique_across_records_and_fields() {
    let tv = TestVault::initialized().await.unwrap();
    for i in 0..20 {
        tv.add(&format!("svc{i:02}"), "user", "same-password").await.unwrap();
    }

    let mut nonces = HashSet::new();
    let mut ciphertexts = HashSet::new();
    for name in tv.vault.list_services().await.unwrap() {
        let row = tv.storage.get_credential(&name).await.unwrap().unwrap();
        assert!(nonces.insert(row.username_nonce));
        assert!(nonces.insert(row.password_nonce));
        assert!(ciphertexts.insert(row.encrypted_password));
    }
    assert_eq!(nonces.len(), 40);
    assert_eq!(ciphertexts.len(), 20);
}

#[tokio::test]
async fn swapped_ciphertext_fails_to_open() {
    let tv = TestVault::initialized().await.unwrap();
    tv.add("bank", "alice", "bank-pass").await.unwrap();
    tv.add("mail", "alice", "mail-pass").await.unwrap();

    let bank = tv.storage.get_credential("bank").await.unwrap().unwrap();
    let mail = tv.storage.get_credential("mail").await.unwrap().unwrap();
    let forged = CredentialRecord {
        encrypted_password: bank.encrypted_password,
        password_nonce: bank.password_nonce,
        ..mail
    };
    tv.memory().unwrap().overwrite_credential(forged).await;

    let err = tv
        .vault
        .get_credential("mail", &secret(MASTER_PASSWORD))
        .await
        .unwrap_err();
    assert!(matches!(err, FroskError::DecryptionFailed { .. }), "got {err:?}");
}

#[tokio::test]
async fn zero_row_insert_is_an_invariant_violation() {
    let tv = TestVault::initialized().await.unwrap();
    tv.memory().unwrap().fail_inserts_with_zero_rows();

    let err = tv.add("github", "alice", "p@ss1").await.unwrap_err();
    assert!(
        matches!(err, FroskError::PersistenceInvariantViolation(_)),
        "got {err:?}"
    );
}

#[tokio::test]
async fn zero_row_master_insert_leaves_vault_uninitialized() {
    let tv = TestVault::builder().build().await.unwrap();
    tv.memory().unwrap().fail_inserts_with_zero_rows();

    let err = tv
        .vault
        .initialize(&secret(MASTER_PASSWORD))
        .await
        .unwrap_err();
    assert!(
        matches!(err, FroskError::PersistenceInvariantViolation(_)),
        "got {err:?}"
    );
    assert_eq!(tv.vault.state().await.unwrap(), VaultState::Uninitialized);
    assert_eq!(tv.memory().unwrap().insert_count(), 0);
}

#[tokio::test]
async fn listing_is_repeatable_and_ordered() {
    let tv = TestVault::initialized().await.unwrap();
    for name in ["gitlab", "aws", "mail"] {
        tv.add(name, "me", "secret").await.unwrap();
    }
    let first = tv.vault.list_services().await.unwrap();
    let second = tv.vault.list_services().await.unwrap();
    assert_eq!(first, vec!["aws", "gitlab", "mail"]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn credentials_readable_after_close_flushes() {
    let tv = TestVault::builder().with_sqlite().build().await.unwrap();
    tv.vault.initialize(&secret(MASTER_PASSWORD)).await.unwrap();
    tv.add("github", "alice", "p@ss1").await.unwrap();
    tv.vault.close().await.unwrap();

    let cred = tv
        .vault
        .get_credential("github", &secret(MASTER_PASSWORD))
        .await
        .unwrap();
    assert_eq!(cred.password.expose_secret(), "p@ss1");
}

#[tokio::test]
async fn unwrapping_uses_the_iterations_recorded_at_init() {
    let tv = TestVault::builder()
        .with_config(frosk_config::VaultConfig {
            kdf_iterations: 1500,
            ..cheap_vault_config()
        })
        .build()
        .await
        .unwrap();
    tv.vault.initialize(&secret(MASTER_PASSWORD)).await.unwrap();
    let master = tv.storage.load_master().await.unwrap().unwrap();
    assert_eq!(master.kdf_iterations, 1500);

    // A second handle over the same rows with a different configured count.
    let reconfigured = frosk_vault::Vault::new(tv.storage.clone(), cheap_vault_config());
    reconfigured
        .add_credential("github", "alice", &secret("p@ss1"), &secret(MASTER_PASSWORD))
        .await
        .unwrap();
    let cred = tv
        .vault
        .get_credential("github", &secret(MASTER_PASSWORD))
        .await
        .unwrap();
    assert_eq!(cred.username, "alice");
}

fn fastest_derive(iterations: u32) -> Duration {
    let salt = [9u8; kdf::SALT_LEN];
    (0..5)
        .map(|_| {
            let start = Instant::now();
            kdf::derive_key(b"correct-horse", &salt, iterations).unwrap();
            start.elapsed()
        })
        .min()
        .unwrap()
}

#[test]
fn doubling_iterations_roughly_doubles_key_stretching_time() {
    let single = fastest_derive(50_000).as_secs_f64();
    let double = fastest_derive(100_000).as_secs_f64();
    let ratio = double / single;
    assert!(
        (1.3..3.0).contains(&ratio),
        "50k took {single:.4}s, 100k took {double:.4}s, ratio {ratio:.2}"
    );
}
