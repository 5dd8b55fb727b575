use thiserror::Error;

/// All errors that can occur in NoteVault.
///
/// Services return these unchanged in kind so the outer layer (CLI today,
/// an HTTP handler tomorrow) can map each one to its own response.
#[derive(Debug, Error)]
pub enum NoteVaultError {
    // --- Entity errors ---
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    // --- Cipher errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: corrupted or incompatible ciphertext")]
    DecryptionFailed,

    // --- Credential errors ---
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hash failed: {0}")]
    PasswordHashFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedPasswordHash(String),

    // --- Secret generator errors ---
    #[error("Alphabet must contain at least one character")]
    EmptyAlphabet,

    #[error("Random source failed: {0}")]
    RandomSourceFailed(String),

    // --- Config errors ---
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- Storage errors ---
    #[error("Storage error: {0}")]
    Storage(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),
}

#[cfg(feature = "sqlite-store")]
impl From<rusqlite::Error> for NoteVaultError {
    fn from(err: rusqlite::Error) -> Self {
        NoteVaultError::Storage(err.to_string())
    }
}

/// Convenience type alias for NoteVault results.
pub type Result<T> = std::result::Result<T, NoteVaultError>;
