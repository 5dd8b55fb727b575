//! Cryptographic primitives for NoteVault.
//!
//! This module provides:
//! - AES-256-CBC encryption of secure note values (`cipher`)
//! - Argon2id password hashing and verification (`password`)
//! - Secure random string generation (`random`)

pub mod cipher;
pub mod password;
pub mod random;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{NoteCipher, CredentialHasher, generate_random_string, ...};
pub use cipher::NoteCipher;
pub use password::{Argon2Params, CredentialHasher};
pub use random::{generate_random_string, DEFAULT_ALPHABET};
