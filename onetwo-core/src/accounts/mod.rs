//! Account descriptors
//!
//! An account bundles a Base32 secret with the parameters needed to turn it
//! into codes. Accounts are plain values; the list that holds them is owned
//! by whichever front end displays them.

use crate::auth::generator::CodeGenerator;
use crate::auth::totp::{self, HashAlgorithm, DEFAULT_DIGITS, DEFAULT_PERIOD};
use crate::types::OtpSecret;
use std::time::SystemTime;
use uuid::Uuid;

pub mod list;

pub use list::AccountList;

/// A single TOTP account
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique identifier within an [`AccountList`]
    pub id: Uuid,

    /// Account label, usually the login name
    pub name: String,

    /// Service that issued the secret
    pub issuer: Option<String>,

    /// Base32-encoded shared secret
    pub secret: OtpSecret,

    /// Code length
    pub digits: u32,

    /// Validity window in seconds
    pub period: u64,

    pub algorithm: HashAlgorithm,
}

impl Account {
    /// Create an account with a fresh id and RFC 6238 defaults
    /// (6 digits, 30 seconds, SHA1)
    pub fn new(name: impl Into<String>, secret: impl Into<OtpSecret>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            issuer: None,
            secret: secret.into(),
            digits: DEFAULT_DIGITS,
            period: DEFAULT_PERIOD,
            algorithm: HashAlgorithm::default(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    pub fn with_period(mut self, period: u64) -> Self {
        self.period = period;
        self
    }

    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Label shown next to the code
    pub fn display_name(&self) -> String {
        match &self.issuer {
            Some(issuer) => format!("{} ({})", issuer, self.name),
            None => self.name.clone(),
        }
    }

    /// Generate the code valid at `at` using the supplied generator
    pub fn generate_code(&self, generator: &dyn CodeGenerator, at: SystemTime) -> Option<String> {
        generator.generate_code(
            self.secret.expose(),
            self.digits,
            self.period,
            self.algorithm,
            at,
        )
    }

    /// Seconds until the code valid at `at` expires
    pub fn time_remaining(&self, at: SystemTime) -> f64 {
        totp::time_remaining(self.period, at)
    }
}
