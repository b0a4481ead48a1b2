//! TOTP (Time-based One-Time Password) generation
//!
//! Implements RFC 6238 on top of the RFC 4226 HOTP truncation, using the
//! RustCrypto `hmac`, `sha1` and `sha2` crates for the keyed hash.
//! Time is always passed in, never read from the clock here.

use crate::error::OtpError;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Code lengths accepted by the generator
pub const DIGITS_RANGE: RangeInclusive<u32> = 6..=8;

/// RFC 6238 default time step
pub const DEFAULT_PERIOD: u64 = 30;

/// Default code length
pub const DEFAULT_DIGITS: u32 = 6;

/// Hash algorithm for TOTP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[default]
    #[serde(rename = "SHA1")]
    Sha1,
    #[serde(rename = "SHA256")]
    Sha256,
    #[serde(rename = "SHA512")]
    Sha512,
}

impl HashAlgorithm {
    /// All supported algorithms
    pub const ALL: [HashAlgorithm; 3] = [Self::Sha1, Self::Sha256, Self::Sha512];

    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "SHA1",
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sha512 => "SHA512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = OtpError;

    /// Parse an algorithm name, ignoring case and an optional dash (`sha-256`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "").as_str() {
            "SHA1" => Ok(HashAlgorithm::Sha1),
            "SHA256" => Ok(HashAlgorithm::Sha256),
            "SHA512" => Ok(HashAlgorithm::Sha512),
            _ => Err(OtpError::UnsupportedAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

/// Seconds since the Unix epoch, negative for earlier instants
fn unix_seconds(at: SystemTime) -> f64 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs_f64(),
        Err(e) => -e.duration().as_secs_f64(),
    }
}

/// Compute the RFC 6238 time step counter for `at`
pub fn counter(period: u64, at: SystemTime) -> Result<u64, OtpError> {
    if period == 0 {
        return Err(OtpError::InvalidParameters {
            reason: "period must be positive".to_string(),
        });
    }

    let elapsed = at
        .duration_since(UNIX_EPOCH)
        .map_err(|_| OtpError::InvalidParameters {
            reason: "time precedes the Unix epoch".to_string(),
        })?;

    Ok(elapsed.as_secs() / period)
}

/// Compute the keyed digest of `message` with the selected algorithm
fn hmac_digest(
    algorithm: HashAlgorithm,
    key: &[u8],
    message: &[u8],
) -> Result<Vec<u8>, OtpError> {
    macro_rules! digest_with {
        ($hash:ty) => {{
            let mut mac = Hmac::<$hash>::new_from_slice(key)
                .map_err(|_| OtpError::InvalidSecretEncoding)?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }};
    }

    let digest = match algorithm {
        HashAlgorithm::Sha1 => digest_with!(Sha1),
        HashAlgorithm::Sha256 => digest_with!(Sha256),
        HashAlgorithm::Sha512 => digest_with!(Sha512),
    };

    Ok(digest)
}

/// RFC 4226 dynamic truncation
///
/// Every supported digest is at least 20 bytes, so `offset + 4` never
/// runs past the end.
fn truncate(digest: &[u8]) -> u32 {
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let word = [
        digest[offset],
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ];
    u32::from_be_bytes(word) & 0x7fff_ffff
}

/// Generate a TOTP code, returning the reason on failure
pub fn try_generate(
    secret: &[u8],
    digits: u32,
    period: u64,
    algorithm: HashAlgorithm,
    time: SystemTime,
) -> Result<String, OtpError> {
    if secret.is_empty() {
        return Err(OtpError::InvalidSecretEncoding);
    }

    if !DIGITS_RANGE.contains(&digits) {
        return Err(OtpError::InvalidParameters {
            reason: format!(
                "digits must be between {} and {}, got {}",
                DIGITS_RANGE.start(),
                DIGITS_RANGE.end(),
                digits
            ),
        });
    }

    let step = counter(period, time)?;
    let digest = hmac_digest(algorithm, secret, &step.to_be_bytes())?;
    let code = truncate(&digest) % 10u32.pow(digits);

    Ok(format!("{:0width$}", code, width = digits as usize))
}

/// Generate a TOTP code for a decoded secret
///
/// Returns `None` when the secret is empty, `digits` is outside
/// [`DIGITS_RANGE`], `period` is zero, or `time` precedes the epoch.
pub fn generate(
    secret: &[u8],
    digits: u32,
    period: u64,
    algorithm: HashAlgorithm,
    time: SystemTime,
) -> Option<String> {
    match try_generate(secret, digits, period, algorithm, time) {
        Ok(code) => Some(code),
        Err(e) => {
            debug!("TOTP generation failed: {}", e);
            None
        }
    }
}

/// Seconds until the current code expires
///
/// Computed as `next_boundary - t`, so the value lies in `(0, period]` and
/// equals `period` exactly on a window boundary. A zero period has no
/// window and yields `0.0`.
pub fn time_remaining(period: u64, at: SystemTime) -> f64 {
    if period == 0 {
        return 0.0;
    }

    let period = period as f64;
    let now = unix_seconds(at);
    let next_boundary = ((now / period).floor() + 1.0) * period;
    next_boundary - now
}
