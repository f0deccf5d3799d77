//! HISTORY_QCTEST decoding.
//!
//! A QCTEST value is a bitmask where bit `n` set means QC test `n` was
//! performed (or failed, depending on the HISTORY_ACTION). Profile files
//! store it as a hexadecimal string, e.g. `"1B2"` for tests 1, 4, 5, 7, 8.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QcTestError {
    #[error("empty QCTEST value")]
    Empty,

    #[error("malformed QCTEST value '{input}': not a hexadecimal bitmask")]
    Malformed { input: String },
}

/// Test identifiers set in `mask`, ascending.
///
/// Powers of two are scanned from 1 upward while they do not exceed `mask`;
/// the exponent of every power present in `mask` is a test id.
pub fn decode(mask: u64) -> Vec<u32> {
    (0..u64::BITS)
        .take_while(|&bit| 1u64 << bit <= mask)
        .filter(|&bit| mask & (1u64 << bit) != 0)
        .collect()
}

/// Same as [`decode`] for the hexadecimal form found in profile files.
///
/// A zero mask is not an error, it decodes to no tests.
pub fn decode_hex(hex: &str) -> Result<Vec<u32>, QcTestError> {
    let trimmed = hex.trim();
    if trimmed.is_empty() {
        return Err(QcTestError::Empty);
    }
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let malformed = || QcTestError::Malformed {
        input: trimmed.to_string(),
    };
    // a bare prefix is not a blank field
    if digits.is_empty() {
        return Err(malformed());
    }
    let mask = u64::from_str_radix(digits, 16).map_err(|_| malformed())?;
    Ok(decode(mask))
}

/// Inverse of [`decode`].
pub fn encode(ids: &[u32]) -> u64 {
    ids.iter()
        .filter(|&&id| id < u64::BITS)
        .fold(0, |mask, &id| mask | (1u64 << id))
}
