//! Error types for the onetwo authenticator
//!
//! This module defines all error types used throughout the application,
//! providing consistent error handling and user-friendly error messages.

use thiserror::Error;

/// Main error type for the onetwo application
#[derive(Error, Debug)]
pub enum OneTwoError {
    /// Errors related to configuration loading/parsing
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors related to OTP/TOTP operations
    #[error("OTP error: {0}")]
    Otp(#[from] OtpError),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {path}")]
    LoadFailed { path: String },

    #[error("Failed to save configuration file: {path}")]
    SaveFailed { path: String },

    #[error("Configuration validation error: {message}")]
    ValidationError { message: String },

    #[error("I/O error: {message}")]
    IoError { message: String },
}

/// OTP/TOTP operation errors
///
/// None of these are fatal. The `Option`-returning entry points collapse
/// them into an absent value and leave presentation to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// Empty after normalization, outside the Base32 alphabet, or decodes to zero bytes
    #[error("Invalid Base32 secret")]
    InvalidSecretEncoding,

    #[error("Unsupported hash algorithm: {name}")]
    UnsupportedAlgorithm { name: String },

    #[error("Invalid TOTP parameters: {reason}")]
    InvalidParameters { reason: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, OneTwoError>;
