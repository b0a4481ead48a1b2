//! Configuration commands

use colored::Colorize;
use onetwo_core::config::{toml_config, OneTwoConfig};
use onetwo_core::error::OneTwoError;

/// Print the path and effective configuration
pub fn run_config_show() -> Result<(), OneTwoError> {
    let path = toml_config::get_config_path()?;
    let config = toml_config::load_config()?;

    if toml_config::config_exists()? {
        println!("# {}", path.display());
    } else {
        println!("# {} (not found, showing defaults)", path.display());
    }
    print!("{}", toml_config::to_toml_string(&config)?);
    Ok(())
}

/// Write the default configuration
pub fn run_config_init(force: bool) -> Result<(), OneTwoError> {
    if toml_config::config_exists()? && !force {
        let path = toml_config::get_config_path()?;
        eprintln!(
            "{} Configuration already exists at {}, use --force to overwrite",
            "⚠".yellow(),
            path.display()
        );
        return Ok(());
    }

    let path = toml_config::save_config(&OneTwoConfig::default())?;
    println!("{} Wrote {}", "✓".green(), path.display());
    Ok(())
}
