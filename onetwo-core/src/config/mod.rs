//! Configuration module
//!
//! Handles loading and saving authenticator settings from TOML files.
//! Accounts themselves are never written to disk.

use crate::auth::generator::GeneratorKind;
use crate::auth::totp::{HashAlgorithm, DEFAULT_DIGITS, DEFAULT_PERIOD, DIGITS_RANGE};
use serde::{Deserialize, Serialize};

pub mod toml_config;

/// Label shown in place of a code when generation fails
pub const DEFAULT_INVALID_LABEL: &str = "Invalid";

/// Parameters applied to accounts created without explicit values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountDefaults {
    pub digits: u32,
    pub period: u64,
    pub algorithm: HashAlgorithm,
}

impl Default for AccountDefaults {
    fn default() -> Self {
        Self {
            digits: DEFAULT_DIGITS,
            period: DEFAULT_PERIOD,
            algorithm: HashAlgorithm::default(),
        }
    }
}

/// Authenticator configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OneTwoConfig {
    /// Which code generator to use
    pub generator: GeneratorKind,

    /// Text displayed when a code cannot be generated
    pub invalid_code_label: String,

    /// Seconds between display refreshes in watch mode
    pub refresh_interval_secs: u64,

    /// Defaults for new accounts
    pub defaults: AccountDefaults,
}

impl OneTwoConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.invalid_code_label.trim().is_empty() {
            return Err("Invalid code label cannot be empty".to_string());
        }

        if self.refresh_interval_secs == 0 {
            return Err("Refresh interval cannot be zero".to_string());
        }

        if !DIGITS_RANGE.contains(&self.defaults.digits) {
            return Err(format!(
                "Default digits must be between {} and {}",
                DIGITS_RANGE.start(),
                DIGITS_RANGE.end()
            ));
        }

        if self.defaults.period == 0 {
            return Err("Default period cannot be zero".to_string());
        }

        Ok(())
    }
}

impl Default for OneTwoConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorKind::default(),
            invalid_code_label: DEFAULT_INVALID_LABEL.to_string(),
            refresh_interval_secs: 1,
            defaults: AccountDefaults::default(),
        }
    }
}
