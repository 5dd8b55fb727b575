//! `notevault keygen`: print a fresh key and IV in env form.

use crate::cli::output;
use crate::config::ENV_PREFIX;
use crate::crypto::cipher::{IV_LEN, KEY_LEN};
use crate::crypto::generate_random_string;
use crate::errors::Result;

/// Alphanumeric only, so the output pastes into any shell or `.env` file.
const KEY_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Execute the `keygen` command.
pub fn execute() -> Result<()> {
    let key = generate_random_string(KEY_LEN, KEY_ALPHABET)?;
    let iv = generate_random_string(IV_LEN, KEY_ALPHABET)?;

    println!("{ENV_PREFIX}ENCRYPTION_KEY={key}");
    println!("{ENV_PREFIX}ENCRYPTION_IV={iv}");

    output::warning("Losing this key makes every secure note unreadable. Store it safely.");
    Ok(())
}
