//! Cryptographically secure random strings.
//!
//! Every character is drawn from the OS random source.  Indices are
//! picked by rejection sampling so each alphabet character is equally
//! likely regardless of the alphabet size.

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::errors::{NoteVaultError, Result};

/// Alphabet used when the caller does not supply one.
pub const DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890!.?#";

/// Generate a string of `length` characters, each taken from `alphabet`.
///
/// `length` counts characters, not bytes, so multi-byte alphabets work.
/// Fails with `EmptyAlphabet` when `alphabet` has no characters, and with
/// `InvalidInput` when `length` cannot be allocated.
pub fn generate_random_string(length: usize, alphabet: &str) -> Result<String> {
    let chars: Vec<char> = alphabet.chars().collect();
    if chars.is_empty() {
        return Err(NoteVaultError::EmptyAlphabet);
    }

    let bound = u32::try_from(chars.len()).map_err(|_| {
        NoteVaultError::InvalidInput(format!(
            "alphabet cannot exceed {} characters",
            u32::MAX
        ))
    })?;

    let mut rng = OsRng;
    let mut out = String::new();
    out.try_reserve(length).map_err(|e| {
        NoteVaultError::InvalidInput(format!("cannot generate {length} characters: {e}"))
    })?;
    for _ in 0..length {
        out.push(chars[uniform_index(&mut rng, bound)?]);
    }

    Ok(out)
}

/// Draw an index in `0..bound` without modulo bias.
fn uniform_index(rng: &mut OsRng, bound: u32) -> Result<usize> {
    // Draws at or above `zone` would over-represent the low indices.
    let zone = (u32::MAX / bound) * bound;
    loop {
        let draw = rng
            .try_next_u32()
            .map_err(|e| NoteVaultError::RandomSourceFailed(e.to_string()))?;
        if draw < zone {
            return Ok((draw % bound) as usize);
        }
    }
}
