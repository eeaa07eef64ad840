use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::ExtractError;

/// Decoded-size ceiling for uploads: 15 MiB.
pub const MAX_DECODED_BYTES: usize = 15 * 1024 * 1024;

/// Decode a base64 payload, enforcing the non-empty and size invariants
/// before any extraction strategy sees the bytes.
pub fn decode_payload(content: &str) -> Result<Vec<u8>, ExtractError> {
    let data = STANDARD
        .decode(content.trim())
        .map_err(|e| ExtractError::Decode(e.to_string()))?;

    if data.is_empty() {
        return Err(ExtractError::Decode("empty file content".to_string()));
    }
    if data.len() > MAX_DECODED_BYTES {
        return Err(ExtractError::PayloadTooLarge {
            size: data.len(),
            limit: MAX_DECODED_BYTES,
        });
    }

    Ok(data)
}
