//! CLI command implementations
//!
//! This module contains the implementation of all CLI subcommands.

pub mod code;
pub mod config;
pub mod decode;
pub mod watch;

use onetwo_core::accounts::Account;
use onetwo_core::auth::generator::GeneratorKind;
use onetwo_core::auth::{base32, totp};
use onetwo_core::config::OneTwoConfig;
use onetwo_core::error::OtpError;
use std::time::SystemTime;
use tracing::debug;

/// Generator choice taken from global command line flags
#[derive(Debug, Clone, Copy)]
pub struct GeneratorSelection {
    pub generator: Option<GeneratorKind>,
    pub uitesting: bool,
}

impl GeneratorSelection {
    /// Resolve against the configuration: `--uitesting` wins, then
    /// `--generator`, then the configured value
    pub fn resolve(&self, config: &OneTwoConfig) -> GeneratorKind {
        let kind = if self.uitesting {
            GeneratorKind::Predictable
        } else {
            self.generator.unwrap_or(config.generator)
        };
        debug!("Using {} code generator", kind);
        kind
    }
}

/// Work out why an account produced no code
fn failure_reason(account: &Account, at: SystemTime) -> OtpError {
    let key = match base32::try_decode(account.secret.expose()) {
        Ok(key) => key,
        Err(e) => return e,
    };

    match totp::try_generate(&key, account.digits, account.period, account.algorithm, at) {
        Err(e) => e,
        // Live generation succeeds, so the active generator rejected the parameters
        Ok(_) => OtpError::InvalidParameters {
            reason: format!(
                "generator rejected digits={} period={}",
                account.digits, account.period
            ),
        },
    }
}
