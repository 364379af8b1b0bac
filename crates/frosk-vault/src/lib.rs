// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key hierarchy and credential encryption for the frosk password vault.
//!
//! A random 256-bit data encryption key (DEK) seals every credential with
//! AES-256-GCM. The DEK is stored wrapped under a key stretched from the
//! master password with PBKDF2-HMAC-SHA256. The master password is verified
//! separately against an Argon2id hash, which never feeds key derivation.

pub mod credentials;
pub mod crypto;
pub mod encoding;
pub mod generator;
pub mod kdf;
pub mod master;
pub mod password;
pub mod prompt;
pub mod vault;

pub use credentials::{Credential, CredentialStore};
pub use generator::generate_password;
pub use master::{DataKey, MasterKeyManager};
pub use prompt::{get_master_password, get_master_password_with_confirm};
pub use vault::{Vault, mask_secret};
