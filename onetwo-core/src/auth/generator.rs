//! Substitutable code generators
//!
//! Callers hold a `Box<dyn CodeGenerator>` chosen through [`GeneratorKind`],
//! so deterministic generators can stand in for the live one under test or
//! UI automation without touching the code that displays codes.

use crate::auth::{base32, totp};
use crate::auth::totp::HashAlgorithm;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;
use tracing::debug;

/// Produces a code for a Base32 secret at a given instant
pub trait CodeGenerator: Send + Sync {
    fn generate_code(
        &self,
        secret: &str,
        digits: u32,
        period: u64,
        algorithm: HashAlgorithm,
        time: SystemTime,
    ) -> Option<String>;
}

/// RFC 6238 generator backed by HMAC
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveGenerator;

impl CodeGenerator for LiveGenerator {
    fn generate_code(
        &self,
        secret: &str,
        digits: u32,
        period: u64,
        algorithm: HashAlgorithm,
        time: SystemTime,
    ) -> Option<String> {
        let key = base32::decode(secret)?;
        totp::generate(&key, digits, period, algorithm, time)
    }
}

/// Time-step counter, ignoring secret and algorithm
///
/// Returns the window number modulo `10^digits`, which makes expected
/// codes trivial to compute in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedGenerator;

impl CodeGenerator for FixedGenerator {
    fn generate_code(
        &self,
        _secret: &str,
        digits: u32,
        period: u64,
        _algorithm: HashAlgorithm,
        time: SystemTime,
    ) -> Option<String> {
        let modulus = modulus(digits)?;
        let block = totp::counter(period, time).ok()?;
        Some(pad(block % modulus, digits))
    }
}

/// Deterministic per-account codes for UI automation
///
/// The leading digit follows the time window so displays visibly refresh,
/// while the trailing digits are derived from the secret so accounts
/// can be told apart.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredictableGenerator;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

impl PredictableGenerator {
    /// 64-bit FNV-1a over the secret text as given
    fn secret_hash(secret: &str) -> u64 {
        secret.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        })
    }
}

impl CodeGenerator for PredictableGenerator {
    fn generate_code(
        &self,
        secret: &str,
        digits: u32,
        period: u64,
        _algorithm: HashAlgorithm,
        time: SystemTime,
    ) -> Option<String> {
        let modulus = modulus(digits)?;
        let block = totp::counter(period, time).ok()?;
        let base = (block % 10) * 100_000 + Self::secret_hash(secret) % 100_000;
        Some(pad(base % modulus, digits))
    }
}

/// `10^digits`, or `None` for lengths outside the accepted range
fn modulus(digits: u32) -> Option<u64> {
    if totp::DIGITS_RANGE.contains(&digits) {
        Some(10u64.pow(digits))
    } else {
        debug!("Rejected code length {}", digits);
        None
    }
}

fn pad(value: u64, digits: u32) -> String {
    format!("{:0width$}", value, width = digits as usize)
}

/// Generator selection, as named in configuration and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    #[default]
    Live,
    Fixed,
    Predictable,
}

impl GeneratorKind {
    /// Instantiate the selected generator
    pub fn build(self) -> Box<dyn CodeGenerator> {
        match self {
            GeneratorKind::Live => Box::new(LiveGenerator),
            GeneratorKind::Fixed => Box::new(FixedGenerator),
            GeneratorKind::Predictable => Box::new(PredictableGenerator),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorKind::Live => "live",
            GeneratorKind::Fixed => "fixed",
            GeneratorKind::Predictable => "predictable",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "live" => Ok(GeneratorKind::Live),
            "fixed" => Ok(GeneratorKind::Fixed),
            "predictable" => Ok(GeneratorKind::Predictable),
            other => Err(format!(
                "unknown generator '{}', expected live, fixed or predictable",
                other
            )),
        }
    }
}
