// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PBKDF2-HMAC-SHA256 stretching of the master password into the key that
//! wraps the data encryption key.

use std::num::NonZeroU32;

use frosk_core::FroskError;
use ring::pbkdf2;
use zeroize::Zeroizing;

use crate::crypto::{self, KEY_LEN};

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Iteration count used when none is configured.
pub const DEFAULT_ITERATIONS: u32 = 4096;

/// Derive a 32-byte wrapping key. Deterministic for equal inputs; cost grows
/// linearly with `iterations`.
pub fn derive_key(
    password: &[u8],
    salt: &[u8; SALT_LEN],
    iterations: u32,
) -> Result<Zeroizing<[u8; KEY_LEN]>, FroskError> {
    let iterations = NonZeroU32::new(iterations)
        .ok_or_else(|| FroskError::Primitive("PBKDF2 iteration count must be non-zero".into()))?;
    let mut out = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt,
        password,
        &mut out[..],
    );
    Ok(out)
}

/// A fresh random salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN], FroskError> {
    let mut salt = [0u8; SALT_LEN];
    crypto::fill_random(&mut salt)?;
    Ok(salt)
}
