//! TOML configuration file I/O
//!
//! Handles loading and saving configuration to/from TOML files
//! in the user's configuration directory.

use crate::config::OneTwoConfig;
use crate::error::{ConfigError, OneTwoError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "ONETWO_CONFIG_DIR";

/// Get the default configuration directory
///
/// Returns ~/.config/onetwo, or ONETWO_CONFIG_DIR if set
pub fn get_config_dir() -> Result<PathBuf, OneTwoError> {
    if let Ok(config_dir) = std::env::var(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(config_dir));
    }

    let home = std::env::var("HOME").map_err(|_| {
        OneTwoError::Config(ConfigError::IoError {
            message: "HOME environment variable not set".to_string(),
        })
    })?;

    Ok(PathBuf::from(home).join(".config").join("onetwo"))
}

/// Get the default configuration file path
pub fn get_config_path() -> Result<PathBuf, OneTwoError> {
    let config_dir = get_config_dir()?;
    Ok(config_dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from the default TOML file
///
/// A missing file is not an error; defaults are used instead.
pub fn load_config() -> Result<OneTwoConfig, OneTwoError> {
    let config_path = get_config_path()?;
    if !config_path.exists() {
        debug!("No configuration at {:?}, using defaults", config_path);
        return Ok(OneTwoConfig::default());
    }
    load_config_from_path(&config_path)
}

/// Load configuration from a specific TOML file
pub fn load_config_from_path<P: AsRef<Path>>(path: P) -> Result<OneTwoConfig, OneTwoError> {
    let contents = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => OneTwoError::Config(ConfigError::LoadFailed {
            path: path.as_ref().to_string_lossy().to_string(),
        }),
        _ => OneTwoError::Config(ConfigError::IoError {
            message: format!("Failed to read config file: {}", e),
        }),
    })?;

    let config = parse_config(&contents)?;
    debug!("Loaded configuration from {:?}", path.as_ref());
    Ok(config)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(contents: &str) -> Result<OneTwoConfig, OneTwoError> {
    let config: OneTwoConfig = toml::from_str(contents).map_err(|e| {
        OneTwoError::Config(ConfigError::ValidationError {
            message: format!("Failed to parse config file: {}", e),
        })
    })?;

    config
        .validate()
        .map_err(|e| OneTwoError::Config(ConfigError::ValidationError { message: e }))?;

    Ok(config)
}

/// Render configuration as TOML text
pub fn to_toml_string(config: &OneTwoConfig) -> Result<String, OneTwoError> {
    Ok(toml::to_string_pretty(config)?)
}

/// Save configuration to the default TOML file
pub fn save_config(config: &OneTwoConfig) -> Result<PathBuf, OneTwoError> {
    let config_path = get_config_path()?;
    save_config_to_path(config, &config_path)?;
    Ok(config_path)
}

/// Save configuration to a specific TOML file
pub fn save_config_to_path<P: AsRef<Path>>(
    config: &OneTwoConfig,
    path: P,
) -> Result<(), OneTwoError> {
    // Validate configuration before saving
    config
        .validate()
        .map_err(|e| OneTwoError::Config(ConfigError::ValidationError { message: e }))?;

    // Ensure config directory exists
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            OneTwoError::Config(ConfigError::IoError {
                message: format!("Failed to create config directory: {}", e),
            })
        })?;
    }

    let contents = to_toml_string(config)?;

    std::fs::write(&path, contents).map_err(|_| {
        OneTwoError::Config(ConfigError::SaveFailed {
            path: path.as_ref().to_string_lossy().to_string(),
        })
    })?;

    info!("Saved configuration to {:?}", path.as_ref());
    Ok(())
}

/// Check if a configuration file exists
pub fn config_exists() -> Result<bool, OneTwoError> {
    let config_path = get_config_path()?;
    Ok(config_path.exists())
}
