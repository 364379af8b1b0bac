// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text encodings for persisted fields: standard base64 and row timestamps.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use frosk_core::FroskError;

/// Timestamp layout stored in `created_at` / `updated_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a base64 field; `field` names it in the error.
pub fn decode(field: &str, text: &str) -> Result<Vec<u8>, FroskError> {
    STANDARD
        .decode(text)
        .map_err(|e| FroskError::CorruptedRecord(format!("{field} is not valid base64: {e}")))
}

/// Decode a base64 field that must hold exactly `N` bytes.
pub fn decode_array<const N: usize>(field: &str, text: &str) -> Result<[u8; N], FroskError> {
    let bytes = decode(field, text)?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| {
        FroskError::CorruptedRecord(format!("{field} must be {N} bytes, found {len}"))
    })
}

/// Current UTC time in [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string()
}
