// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Random password generation from the OS CSPRNG.

use frosk_core::FroskError;
use rand::RngCore;
use rand::rngs::OsRng;

const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SPECIAL: &[u8] = b"!#$%&'()*+,-./:;<=>?@";

/// Length used by the CLI when none is given.
pub const DEFAULT_LENGTH: usize = 20;

/// Character set for [`generate_password`].
pub fn charset(include_special: bool) -> Vec<u8> {
    let mut set = ALPHANUMERIC.to_vec();
    if include_special {
        set.extend_from_slice(SPECIAL);
    }
    set
}

/// Generate `length` characters drawn uniformly from [`charset`].
///
/// Uses rejection sampling over random bytes, so no character is favoured,
/// and surfaces a failing random source instead of panicking.
pub fn generate_password(length: usize, include_special: bool) -> Result<String, FroskError> {
    let set = charset(include_special);
    // Largest multiple of the set size that fits in a byte.
    let limit = 256 - (256 % set.len());

    let mut out = String::with_capacity(length);
    let mut buf = [0u8; 64];
    while out.len() < length {
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| FroskError::Primitive(format!("OS random source failed: {e}")))?;
        for &b in buf.iter() {
            if (b as usize) < limit {
                out.push(set[b as usize % set.len()] as char);
                if out.len() == length {
                    break;
                }
            }
        }
    }
    Ok(out)
}
