//! Argon2id password hashing and verification for account credentials.
//!
//! Hashes are self-describing PHC strings
//! (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`), so verification
//! always uses the parameters a hash was created with, even after the
//! configured profile changes.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::errors::{NoteVaultError, Result};

/// Length of the derived hash in bytes.
const OUTPUT_LEN: usize = 32;

/// Length of the random salt in bytes.
const SALT_LEN: usize = 16;

/// Minimum safe memory cost in KiB (8 MB).
pub const MIN_MEMORY_KIB: u32 = 8_192;

/// Configurable Argon2id parameters.
///
/// These map 1:1 to the fields in `Settings` so the CLI can pass
/// whatever the user configured in `notevault.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 1).
    pub iterations: u32,
    /// Parallelism lanes (default: 2).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 1,
            parallelism: 2,
        }
    }
}

impl Argon2Params {
    /// Reject profiles below the safety floor.
    pub fn validate(&self) -> Result<()> {
        if self.memory_kib < MIN_MEMORY_KIB {
            return Err(NoteVaultError::InvalidConfiguration(format!(
                "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
                self.memory_kib
            )));
        }
        if self.iterations < 1 {
            return Err(NoteVaultError::InvalidConfiguration(
                "Argon2 iterations must be at least 1".into(),
            ));
        }
        if self.parallelism < 1 {
            return Err(NoteVaultError::InvalidConfiguration(
                "Argon2 parallelism must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Salted, memory-hard password hasher.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// Build a hasher for the given profile.
    pub fn new(argon2_params: Argon2Params) -> Result<Self> {
        argon2_params.validate()?;

        let params = Params::new(
            argon2_params.memory_kib,
            argon2_params.iterations,
            argon2_params.parallelism,
            Some(OUTPUT_LEN),
        )
        .map_err(|e| NoteVaultError::InvalidConfiguration(format!("invalid Argon2 params: {e}")))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash `password` with a fresh random salt.
    ///
    /// Returns the hash in PHC string format.
    pub fn hash(&self, password: &str) -> Result<String> {
        let mut salt_bytes = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|e| NoteVaultError::RandomSourceFailed(e.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| NoteVaultError::PasswordHashFailed(e.to_string()))?;

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| NoteVaultError::PasswordHashFailed(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Check `password` against a stored PHC hash.
    ///
    /// Returns `Ok(false)` on mismatch.  A hash that cannot be parsed is
    /// an error (`MalformedPasswordHash`), never a silent mismatch.
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| NoteVaultError::MalformedPasswordHash(e.to_string()))?;

        // The digest comparison inside `verify_password` is constant-time.
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(NoteVaultError::MalformedPasswordHash(e.to_string())),
        }
    }
}
