//! onetwo - TOTP authenticator CLI
//!
//! Prints RFC 6238 codes for Base32 secrets and keeps a live view of
//! accounts refreshing once per second.

use clap::{Parser, Subcommand};
use onetwo_core::{auth::generator::GeneratorKind, error::OneTwoError, init_logging};

mod cli;

#[derive(Parser)]
#[command(name = "onetwo")]
#[command(about = "Time-based one-time passcodes from Base32 secrets")]
struct Cli {
    /// Code generator to use instead of the configured one
    #[arg(long, global = true, value_name = "live|fixed|predictable")]
    generator: Option<GeneratorKind>,

    /// Use predictable codes for UI automation
    #[arg(long, global = true)]
    uitesting: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current code for a secret
    Code(cli::code::CodeArgs),
    /// Decode a Base32 secret and print it as hex
    Decode {
        /// Base32 secret (case, spaces and dashes are ignored)
        secret: String,
    },
    /// Show codes for several accounts, refreshing every interval
    Watch(cli::watch::WatchArgs),
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(2);
    }

    let selection = cli::GeneratorSelection {
        generator: cli.generator,
        uitesting: cli.uitesting,
    };

    let result = match cli.command {
        Commands::Code(args) => cli::code::run_code(args, selection),
        Commands::Decode { secret } => cli::decode::run_decode(&secret),
        Commands::Watch(args) => cli::watch::run_watch(args, selection),
        Commands::Config { action } => match action {
            ConfigCommands::Show => cli::config::run_config_show(),
            ConfigCommands::Init { force } => cli::config::run_config_init(force),
        },
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            let exit_code = match e {
                // Configuration and secret errors (exit code 2)
                OneTwoError::Config(_) | OneTwoError::Toml(_) | OneTwoError::TomlSerialize(_) => 2,
                OneTwoError::Otp(_) => 2,
                // IO errors (exit code 1 - runtime)
                OneTwoError::Io(_) => 1,
            };

            eprintln!("{}", e);
            std::process::exit(exit_code);
        }
    }
}
