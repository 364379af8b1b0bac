// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-GCM sealing and system randomness.
//!
//! Nonces are 96 bits and must never repeat under one key. Every caller draws
//! a fresh nonce from [`generate_nonce`] per encryption; nothing here counts
//! or caches nonces.

use frosk_core::FroskError;
use ring::aead::{AES_256_GCM, Aad, LessSafeKey, Nonce, UnboundKey};
use ring::rand::{SecureRandom, SystemRandom};
use tracing::error;
use zeroize::Zeroizing;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;
/// GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;
/// GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// An AES-256-GCM instance bound to one key.
pub struct Aead {
    key: LessSafeKey,
}

impl std::fmt::Debug for Aead {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aead").field("key", &"[REDACTED]").finish()
    }
}

/// Build an AEAD from raw key bytes, which must be exactly [`KEY_LEN`] long.
pub fn build_aead(key: &[u8]) -> Result<Aead, FroskError> {
    if key.len() != KEY_LEN {
        error!(expected = KEY_LEN, actual = key.len(), "AES-256-GCM key has the wrong length");
        return Err(FroskError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: key.len(),
        });
    }
    let unbound = UnboundKey::new(&AES_256_GCM, key).map_err(|_| {
        error!("ring rejected the AES-256-GCM key");
        FroskError::Primitive("failed to create AES-256-GCM key".to_string())
    })?;
    Ok(Aead {
        key: LessSafeKey::new(unbound),
    })
}

impl Aead {
    /// Encrypt `plaintext`, returning ciphertext with the tag appended.
    pub fn seal(
        &self,
        nonce: &[u8; NONCE_LEN],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, FroskError> {
        let mut in_out = plaintext.to_vec();
        self.key
            .seal_in_place_append_tag(
                Nonce::assume_unique_for_key(*nonce),
                Aad::from(aad),
                &mut in_out,
            )
            .map_err(|_| {
                error!(len = plaintext.len(), "AES-256-GCM seal failed");
                FroskError::Primitive("AES-256-GCM encryption failed".to_string())
            })?;
        Ok(in_out)
    }

    /// Decrypt and authenticate. A wrong key, wrong AAD, or any altered byte
    /// yields [`FroskError::DecryptionFailed`] labelled with `context`.
    pub fn open(
        &self,
        nonce: &[u8; NONCE_LEN],
        ciphertext: &[u8],
        aad: &[u8],
        context: &str,
    ) -> Result<Zeroizing<Vec<u8>>, FroskError> {
        let mut in_out = Zeroizing::new(ciphertext.to_vec());
        let len = self
            .key
            .open_in_place(
                Nonce::assume_unique_for_key(*nonce),
                Aad::from(aad),
                in_out.as_mut_slice(),
            )
            .map_err(|_| FroskError::decryption(context))?
            .len();
        in_out.truncate(len);
        Ok(in_out)
    }
}

/// One-shot encryption under a raw key.
pub fn seal(
    key: &[u8],
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, FroskError> {
    build_aead(key)?.seal(nonce, plaintext, aad)
}

/// One-shot decryption under a raw key.
pub fn open(
    key: &[u8],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<Zeroizing<Vec<u8>>, FroskError> {
    build_aead(key)?.open(nonce, ciphertext, aad, "opening sealed data")
}

/// Fill a buffer of `n` bytes from the system CSPRNG.
pub fn random_bytes(n: usize) -> Result<Vec<u8>, FroskError> {
    let mut buf = vec![0u8; n];
    fill_random(&mut buf)?;
    Ok(buf)
}

pub(crate) fn fill_random(buf: &mut [u8]) -> Result<(), FroskError> {
    SystemRandom::new().fill(buf).map_err(|_| {
        error!(len = buf.len(), "system random source failed");
        FroskError::Primitive("system random source failed".to_string())
    })
}

/// A fresh random GCM nonce.
pub fn generate_nonce() -> Result<[u8; NONCE_LEN], FroskError> {
    let mut nonce = [0u8; NONCE_LEN];
    fill_random(&mut nonce)?;
    Ok(nonce)
}

/// A fresh random 256-bit key, zeroized on drop.
pub fn generate_random_key() -> Result<Zeroizing<[u8; KEY_LEN]>, FroskError> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    fill_random(&mut key[..])?;
    Ok(key)
}
