//! Decode command implementation
//!
//! Prints the raw key material behind a Base32 secret, useful for checking
//! what a provider actually handed out.

use onetwo_core::auth::base32;
use onetwo_core::error::OneTwoError;

/// Run the decode command
///
/// Outputs the decoded key as lowercase hex on stdout.
pub fn run_decode(secret: &str) -> Result<(), OneTwoError> {
    let key = base32::try_decode(secret)?;
    println!("{}", hex::encode(key));
    Ok(())
}
