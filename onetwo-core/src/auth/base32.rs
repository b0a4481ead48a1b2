//! Lenient Base32 decoding for TOTP secrets
//!
//! Secrets are usually typed in by hand or copied from a provider's setup
//! page, so decoding tolerates the noise that comes with that:
//! 1. Fold to uppercase
//! 2. Strip `-` separators and spaces
//! 3. Decode RFC 4648 characters, dropping trailing bits that don't fill a byte
//!
//! Padding (`=`) is not stripped and is rejected like any other
//! character outside the alphabet.

use crate::error::OtpError;
use tracing::debug;

/// RFC 4648 Base32 alphabet
const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Characters removed from input before validation
const SEPARATORS: [char; 2] = ['-', ' '];

/// Normalize a secret: uppercase and strip separators
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !SEPARATORS.contains(c))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Map a normalized character to its 5-bit value
fn value_of(c: char) -> Option<u8> {
    let byte = u8::try_from(c).ok()?;
    ALPHABET.iter().position(|&a| a == byte).map(|v| v as u8)
}

/// Decode a Base32 secret, returning the reason on failure
pub fn try_decode(input: &str) -> Result<Vec<u8>, OtpError> {
    let normalized = normalize(input);

    let values = normalized
        .chars()
        .map(value_of)
        .collect::<Option<Vec<u8>>>()
        .ok_or(OtpError::InvalidSecretEncoding)?;

    let mut output = Vec::with_capacity(values.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for value in values {
        buffer = (buffer << 5) | u32::from(value);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            output.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }

    if output.is_empty() {
        return Err(OtpError::InvalidSecretEncoding);
    }

    Ok(output)
}

/// Decode a Base32 secret
///
/// Returns `None` for empty input, characters outside `A-Z2-7` (after
/// normalization), or input too short to yield a single byte.
pub fn decode(input: &str) -> Option<Vec<u8>> {
    match try_decode(input) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            debug!("Rejected OTP secret: {}", e);
            None
        }
    }
}
