//! `notevault generate`: print a random string.

use crate::crypto::generate_random_string;
use crate::errors::Result;

/// Execute the `generate` command.
pub fn execute(length: usize, alphabet: &str) -> Result<()> {
    let value = generate_random_string(length, alphabet)?;
    println!("{value}");
    Ok(())
}
