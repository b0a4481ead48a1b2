//! Code command implementation
//!
//! Prints the code for a single secret. Plain output is the code alone on
//! stdout so it can be piped; `--json` adds the validity window.

use crate::cli::{failure_reason, GeneratorSelection};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use onetwo_core::accounts::Account;
use onetwo_core::auth::totp::HashAlgorithm;
use onetwo_core::config::{toml_config, OneTwoConfig};
use onetwo_core::error::{OneTwoError, OtpError};
use serde::Serialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Args, Debug)]
pub struct CodeArgs {
    /// Base32 secret (case, spaces and dashes are ignored)
    pub secret: String,

    /// Code length (6 to 8)
    #[arg(short, long)]
    pub digits: Option<u32>,

    /// Validity window in seconds
    #[arg(short, long)]
    pub period: Option<u64>,

    /// Hash algorithm (SHA1, SHA256 or SHA512)
    #[arg(short, long)]
    pub algorithm: Option<HashAlgorithm>,

    /// Unix timestamp to generate the code for instead of now
    #[arg(long, value_name = "UNIX_SECONDS")]
    pub at: Option<u64>,

    /// Print a JSON object instead of the bare code
    #[arg(long)]
    pub json: bool,
}

/// Machine-readable result of the code command
#[derive(Debug, Serialize)]
struct CodeReport<'a> {
    code: &'a str,
    valid: bool,
    digits: u32,
    period: u64,
    algorithm: HashAlgorithm,
    generator: &'a str,
    remaining_secs: f64,
    expires_at: Option<String>,
}

/// Build the account described by the arguments on top of configured defaults
fn account_from_args(args: &CodeArgs, config: &OneTwoConfig) -> Account {
    Account::new("command line", args.secret.as_str())
        .with_digits(args.digits.unwrap_or(config.defaults.digits))
        .with_period(args.period.unwrap_or(config.defaults.period))
        .with_algorithm(args.algorithm.unwrap_or(config.defaults.algorithm))
}

/// Run the code command
pub fn run_code(args: CodeArgs, selection: GeneratorSelection) -> Result<(), OneTwoError> {
    let config = toml_config::load_config()?;
    let kind = selection.resolve(&config);
    let generator = kind.build();

    let account = account_from_args(&args, &config);
    let now = match args.at {
        Some(secs) => UNIX_EPOCH
            .checked_add(Duration::from_secs(secs))
            .ok_or_else(|| OtpError::InvalidParameters {
                reason: "timestamp out of range".to_string(),
            })?,
        None => SystemTime::now(),
    };

    let code = account.generate_code(generator.as_ref(), now);
    let remaining = account.time_remaining(now);
    let displayed = code.as_deref().unwrap_or(&config.invalid_code_label);

    if args.json {
        let expires_at = Duration::try_from_secs_f64(remaining)
            .ok()
            .and_then(|left| now.checked_add(left))
            .map(|at| DateTime::<Utc>::from(at).to_rfc3339());
        let report = CodeReport {
            code: displayed,
            valid: code.is_some(),
            digits: account.digits,
            period: account.period,
            algorithm: account.algorithm,
            generator: kind.as_str(),
            remaining_secs: remaining,
            expires_at,
        };
        let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{}", rendered);
    } else {
        println!("{}", displayed);
        if code.is_some() {
            eprintln!("{}", format!("expires in {:.0}s", remaining.ceil()).dimmed());
        }
    }

    match code {
        Some(_) => Ok(()),
        None => Err(failure_reason(&account, now).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(secret: &str) -> CodeArgs {
        CodeArgs {
            secret: secret.to_string(),
            digits: None,
            period: None,
            algorithm: None,
            at: None,
            json: false,
        }
    }

    #[test]
    fn test_account_uses_config_defaults() {
        let mut config = OneTwoConfig::default();
        config.defaults.digits = 8;
        config.defaults.algorithm = HashAlgorithm::Sha256;

        let account = account_from_args(&args("JBSWY3DPEHPK3PXP"), &config);
        assert_eq!(account.digits, 8);
        assert_eq!(account.period, 30);
        assert_eq!(account.algorithm, HashAlgorithm::Sha256);
    }

    #[test]
    fn test_arguments_override_defaults() {
        let mut code_args = args("JBSWY3DPEHPK3PXP");
        code_args.period = Some(60);
        code_args.algorithm = Some(HashAlgorithm::Sha512);

        let account = account_from_args(&code_args, &OneTwoConfig::default());
        assert_eq!(account.period, 60);
        assert_eq!(account.algorithm, HashAlgorithm::Sha512);
    }
}
