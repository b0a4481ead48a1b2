//! Authentication module
//!
//! Handles Base32 secret decoding, TOTP generation and the
//! substitutable generator used by account displays.

pub mod base32;
pub mod generator;
pub mod totp;
