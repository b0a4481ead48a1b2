//! Watch command implementation
//!
//! Owns the account list and the refresh timer. Every tick re-invokes the
//! generator for every account with the current time; the core itself has
//! no notion of time passing.

use crate::cli::GeneratorSelection;
use chrono::{DateTime, Local};
use clap::Args;
use colored::Colorize;
use onetwo_core::accounts::{Account, AccountList};
use onetwo_core::auth::generator::CodeGenerator;
use onetwo_core::config::{toml_config, OneTwoConfig};
use onetwo_core::error::{OneTwoError, OtpError};
use onetwo_core::types::OtpSecret;
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};

/// Seconds left at which the countdown is highlighted
const EXPIRY_WARNING_SECS: f64 = 5.0;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Base32 secrets to display, optionally as NAME=SECRET
    pub secrets: Vec<String>,

    /// Number of example accounts to add
    #[arg(long, default_value_t = 0)]
    pub examples: usize,

    /// Stop after this many refreshes
    #[arg(long)]
    pub ticks: Option<u64>,
}

/// Build the account list from positional secrets and example requests
fn build_accounts(args: &WatchArgs, config: &OneTwoConfig) -> AccountList {
    let mut accounts = AccountList::new();

    for (index, entry) in args.secrets.iter().enumerate() {
        let (name, secret) = match entry.split_once('=') {
            // Trailing '=' runs are Base32 padding, not a name separator
            Some((name, secret))
                if !name.is_empty() && !secret.trim_start_matches('=').is_empty() =>
            {
                (name.to_string(), secret)
            }
            _ => (format!("Account {}", index + 1), entry.as_str()),
        };

        let account = Account::new(name, OtpSecret::from(secret))
            .with_digits(config.defaults.digits)
            .with_period(config.defaults.period)
            .with_algorithm(config.defaults.algorithm);

        if !account.secret.is_decodable() {
            warn!("{}: {}", account.display_name(), OtpError::InvalidSecretEncoding);
        }
        accounts.add_account(account);
    }

    let examples = if accounts.is_empty() {
        args.examples.max(1)
    } else {
        args.examples
    };
    for _ in 0..examples {
        accounts.add_example_account();
    }

    accounts
}

/// Render one line per account for the instant `now`
fn render(
    accounts: &AccountList,
    generator: &dyn CodeGenerator,
    invalid_label: &str,
    now: SystemTime,
) -> Vec<String> {
    let width = accounts
        .iter()
        .map(|account| account.display_name().chars().count())
        .max()
        .unwrap_or(0);

    accounts
        .iter()
        .map(|account| {
            let code = match account.generate_code(generator, now) {
                Some(code) => code.bold().green(),
                None => invalid_label.red(),
            };
            let remaining = account.time_remaining(now).ceil();
            let countdown = format!("{:>3}s", remaining);
            let countdown = if remaining <= EXPIRY_WARNING_SECS {
                countdown.yellow()
            } else {
                countdown.normal()
            };
            format!(
                "{:<width$}  {}  {}",
                account.display_name(),
                code,
                countdown,
                width = width
            )
        })
        .collect()
}

/// Refresh the display every `interval` until Ctrl-C or the tick limit
async fn refresh_loop(
    accounts: &AccountList,
    generator: &dyn CodeGenerator,
    invalid_label: &str,
    interval: Duration,
    ticks: Option<u64>,
) -> Result<(), OneTwoError> {
    let mut timer = tokio::time::interval(interval);
    timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut refreshed: u64 = 0;
    loop {
        if ticks.is_some_and(|limit| refreshed >= limit) {
            debug!("Tick limit reached after {} refreshes", refreshed);
            break;
        }

        tokio::select! {
            _ = timer.tick() => {
                let now = SystemTime::now();
                let stamp = DateTime::<Local>::from(now).format("%H:%M:%S");
                println!("{}", format!("-- {} --", stamp).dimmed());
                for line in render(accounts, generator, invalid_label, now) {
                    println!("{}", line);
                }
                refreshed += 1;
            }
            signal = &mut ctrl_c => {
                signal?;
                info!("Interrupted, stopping refresh");
                break;
            }
        }
    }

    Ok(())
}

/// Run the watch command
pub fn run_watch(args: WatchArgs, selection: GeneratorSelection) -> Result<(), OneTwoError> {
    let config = toml_config::load_config()?;
    let generator = selection.resolve(&config).build();
    let accounts = build_accounts(&args, &config);
    let interval = Duration::from_secs(config.refresh_interval_secs);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(refresh_loop(
        &accounts,
        generator.as_ref(),
        &config.invalid_code_label,
        interval,
        args.ticks,
    ))
}
