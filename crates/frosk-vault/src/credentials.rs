// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-service credential records sealed under the data encryption key.
//!
//! Username and password are two separate AEAD messages, each with its own
//! random nonce. The associated data binds each ciphertext to its service
//! name and field, so a ciphertext copied into another row or column fails
//! to open.

use std::sync::Arc;

use frosk_core::{CredentialRecord, FroskError, StorageAdapter};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error};

use crate::crypto::{self, Aead, NONCE_LEN};
use crate::encoding;
use crate::master::MasterKeyManager;

const USERNAME_FIELD: &str = "username";
const PASSWORD_FIELD: &str = "password";

/// A decrypted credential.
pub struct Credential {
    pub service_name: String,
    pub username: String,
    pub password: SecretString,
    pub created_at: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("service_name", &self.service_name)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Encrypts, stores, and decrypts credential rows.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn StorageAdapter>,
    keys: MasterKeyManager,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn StorageAdapter>, keys: MasterKeyManager) -> Self {
        Self { storage, keys }
    }

    /// Encrypt and store a new credential.
    ///
    /// Inputs are checked in a fixed order (service name, password, master
    /// password, username) and the first empty one is reported.
    pub async fn add_credential(
        &self,
        service_name: &str,
        username: &str,
        password: &SecretString,
        master: &SecretString,
    ) -> Result<(), FroskError> {
        if service_name.is_empty() {
            return Err(FroskError::EmptyServiceName);
        }
        if password.expose_secret().is_empty() {
            return Err(FroskError::EmptyPassword);
        }
        if master.expose_secret().is_empty() {
            return Err(FroskError::EmptyMasterPassword);
        }
        if username.is_empty() {
            return Err(FroskError::EmptyUsername);
        }

        // Skips the key derivation for the common duplicate case. The insert
        // below still decides races.
        if self.storage.count_service(service_name).await? > 0 {
            return Err(FroskError::ServiceNameAlreadyTaken(service_name.to_string()));
        }

        let dek = self.keys.unwrap_data_key(master).await?;
        let aead = crypto::build_aead(dek.as_bytes())?;
        let (encrypted_username, username_nonce) =
            seal_field(&aead, service_name, USERNAME_FIELD, username.as_bytes())?;
        let (encrypted_password, password_nonce) = seal_field(
            &aead,
            service_name,
            PASSWORD_FIELD,
            password.expose_secret().as_bytes(),
        )?;
        drop(dek);

        let now = encoding::now_timestamp();
        let record = CredentialRecord {
            service_name: service_name.to_string(),
            encrypted_username,
            username_nonce,
            encrypted_password,
            password_nonce,
            created_at: now.clone(),
            updated_at: now,
        };

        let rows = self.storage.insert_credential(&record).await?;
        if rows != 1 {
            error!(service = %service_name, rows, "credential insert affected an unexpected number of rows");
            return Err(FroskError::PersistenceInvariantViolation(format!(
                "credential insert affected {rows} rows, expected 1"
            )));
        }
        debug!(service = %service_name, "credential stored");
        Ok(())
    }

    /// Decrypt the credential stored for `service_name`.
    ///
    /// A wrong master password and a tampered row both surface as
    /// [`FroskError::DecryptionFailed`].
    pub async fn get_credential(
        &self,
        service_name: &str,
        master: &SecretString,
    ) -> Result<Credential, FroskError> {
        if service_name.is_empty() {
            return Err(FroskError::EmptyServiceName);
        }
        if master.expose_secret().is_empty() {
            return Err(FroskError::EmptyMasterPassword);
        }

        let record = self
            .storage
            .get_credential(service_name)
            .await?
            .ok_or_else(|| FroskError::ServiceNameNotFound(service_name.to_string()))?;

        let dek = self.keys.unwrap_data_key(master).await?;
        let aead = crypto::build_aead(dek.as_bytes())?;
        let username = open_field(
            &aead,
            service_name,
            USERNAME_FIELD,
            &record.encrypted_username,
            &record.username_nonce,
        )?;
        let password = open_field(
            &aead,
            service_name,
            PASSWORD_FIELD,
            &record.encrypted_password,
            &record.password_nonce,
        )?;

        debug!(service = %service_name, "credential decrypted");
        Ok(Credential {
            service_name: record.service_name,
            username,
            password: SecretString::from(password),
            created_at: record.created_at,
        })
    }

    /// Permanently remove the credential for `service_name`.
    pub async fn delete_credential(&self, service_name: &str) -> Result<(), FroskError> {
        if service_name.is_empty() {
            return Err(FroskError::EmptyServiceName);
        }
        match self.storage.delete_credential(service_name).await? {
            0 => Err(FroskError::ServiceNameNotFound(service_name.to_string())),
            1 => {
                debug!(service = %service_name, "credential deleted");
                Ok(())
            }
            rows => {
                error!(service = %service_name, rows, "delete removed more than one row");
                Err(FroskError::PersistenceInvariantViolation(format!(
                    "delete of `{service_name}` removed {rows} rows"
                )))
            }
        }
    }

    /// Every stored service name, ordered by name. Nothing is decrypted.
    pub async fn list_service_names(&self) -> Result<Vec<String>, FroskError> {
        self.storage.list_service_names().await
    }
}

fn field_aad(service_name: &str, field: &str) -> Vec<u8> {
    let mut aad = Vec::with_capacity(service_name.len() + field.len() + 1);
    aad.extend_from_slice(service_name.as_bytes());
    aad.push(0);
    aad.extend_from_slice(field.as_bytes());
    aad
}

/// Seal one field under a fresh nonce, returning base64 `(ciphertext, nonce)`.
fn seal_field(
    aead: &Aead,
    service_name: &str,
    field: &str,
    plaintext: &[u8],
) -> Result<(String, String), FroskError> {
    let nonce = crypto::generate_nonce()?;
    let sealed = aead.seal(&nonce, plaintext, &field_aad(service_name, field))?;
    Ok((encoding::encode(&sealed), encoding::encode(&nonce)))
}

fn open_field(
    aead: &Aead,
    service_name: &str,
    field: &str,
    ciphertext_b64: &str,
    nonce_b64: &str,
) -> Result<String, FroskError> {
    let nonce: [u8; NONCE_LEN] = encoding::decode_array(&format!("{field}_nonce"), nonce_b64)?;
    let ciphertext = encoding::decode(&format!("encrypted_{field}"), ciphertext_b64)?;
    let plaintext = aead.open(
        &nonce,
        &ciphertext,
        &field_aad(service_name, field),
        &format!("decrypting {field} for `{service_name}`"),
    )?;
    String::from_utf8(plaintext.to_vec())
        .map_err(|_| FroskError::CorruptedRecord(format!("decrypted {field} is not UTF-8")))
}
