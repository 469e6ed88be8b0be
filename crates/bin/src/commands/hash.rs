//! Password hashing command.

use serde_json::json;
use shutter::user::hash_password;
use zeroize::Zeroizing;

use crate::cli::HashPasswordArgs;
use crate::output::{OutputFormat, print_json};

/// Run the hash-password command
pub fn run(args: HashPasswordArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let plaintext = Zeroizing::new(args.plaintext);
    let hash = hash_password(plaintext.as_str())?;

    match format {
        OutputFormat::Human => println!("{hash}"),
        OutputFormat::Json => print_json(&json!({ "hash": hash }))?,
    }
    Ok(())
}
