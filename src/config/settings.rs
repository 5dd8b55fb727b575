use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::crypto::cipher::{NoteCipher, IV_LEN, KEY_LEN};
use crate::crypto::password::Argon2Params;
use crate::errors::{NoteVaultError, Result};

/// Prefix for every environment variable override.
pub const ENV_PREFIX: &str = "NOTEVAULT_";

/// Which storage adapter to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Memory,
    Sqlite,
}

impl FromStr for StoreKind {
    type Err = NoteVaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(NoteVaultError::InvalidConfiguration(format!(
                "unknown store type '{other}': expected memory or sqlite"
            ))),
        }
    }
}

/// Application configuration, loaded from `notevault.toml` and
/// `NOTEVAULT_*` environment variables.
///
/// Every field has a default, but the encryption key and IV default to
/// empty and fail validation, so a real deployment must supply them.
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// AES-256 key, exactly 32 bytes.
    #[serde(default, skip_serializing)]
    pub encryption_key: String,

    /// CBC initialization vector, exactly 16 bytes.
    #[serde(default, skip_serializing)]
    pub encryption_iv: String,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 1).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 2).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Storage adapter (default: sqlite).
    #[serde(default = "default_store_type")]
    pub store_type: StoreKind,

    /// SQLite database file, relative to the config directory.
    #[serde(default = "default_db_file")]
    pub db_file: String,

    /// Drop and recreate all tables when the store opens.
    #[serde(default)]
    pub delete_on_startup: bool,

    /// Log level for the CLI (default: warn).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    1
}

fn default_argon2_parallelism() -> u32 {
    2
}

fn default_store_type() -> StoreKind {
    StoreKind::Sqlite
}

fn default_db_file() -> String {
    "notevault.db".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            encryption_key: String::new(),
            encryption_iv: String::new(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            store_type: default_store_type(),
            db_file: default_db_file(),
            delete_on_startup: false,
            log_level: default_log_level(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("encryption_key", &"<redacted>")
            .field("encryption_iv", &"<redacted>")
            .field("argon2_memory_kib", &self.argon2_memory_kib)
            .field("argon2_iterations", &self.argon2_iterations)
            .field("argon2_parallelism", &self.argon2_parallelism)
            .field("store_type", &self.store_type)
            .field("db_file", &self.db_file)
            .field("delete_on_startup", &self.delete_on_startup)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Settings {
    /// Name of the config file we look for in the config directory.
    pub const FILE_NAME: &'static str = "notevault.toml";

    /// Load settings from `<config_dir>/notevault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            NoteVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Load the file, then apply process environment overrides.
    pub fn load_with_env(config_dir: &Path) -> Result<Self> {
        let mut settings = Self::load(config_dir)?;
        settings.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(settings)
    }

    /// Override fields from `NOTEVAULT_<FIELD>` variables.
    ///
    /// The key and IV may also come from the file named by
    /// `NOTEVAULT_ENCRYPTION_KEY_FILE` / `NOTEVAULT_ENCRYPTION_IV_FILE`;
    /// the direct variable wins when both are set.  `lookup` abstracts
    /// the environment so tests need not mutate process state.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |field: &str| {
            lookup(&format!("{ENV_PREFIX}{field}")).filter(|value| !value.is_empty())
        };

        if let Some(key) = secret_value(&var, "ENCRYPTION_KEY")? {
            self.encryption_key = key;
        }
        if let Some(iv) = secret_value(&var, "ENCRYPTION_IV")? {
            self.encryption_iv = iv;
        }
        if let Some(v) = var("ARGON2_MEMORY_KIB") {
            self.argon2_memory_kib = parse_number("ARGON2_MEMORY_KIB", &v)?;
        }
        if let Some(v) = var("ARGON2_ITERATIONS") {
            self.argon2_iterations = parse_number("ARGON2_ITERATIONS", &v)?;
        }
        if let Some(v) = var("ARGON2_PARALLELISM") {
            self.argon2_parallelism = parse_number("ARGON2_PARALLELISM", &v)?;
        }
        if let Some(v) = var("STORE_TYPE") {
            self.store_type = v.parse()?;
        }
        if let Some(v) = var("DB_FILE") {
            self.db_file = v;
        }
        if let Some(v) = var("DELETE_ON_STARTUP") {
            self.delete_on_startup = parse_bool("DELETE_ON_STARTUP", &v)?;
        }
        if let Some(v) = var("LOG_LEVEL") {
            self.log_level = v;
        }

        Ok(())
    }

    /// Check everything the services need before they are built.
    ///
    /// Wrong key/IV lengths and weak Argon2 profiles are fatal.
    pub fn validate(&self) -> Result<()> {
        if self.encryption_key.len() != KEY_LEN {
            return Err(NoteVaultError::InvalidConfiguration(format!(
                "must provide a {KEY_LEN} byte {ENV_PREFIX}ENCRYPTION_KEY (got {} bytes)",
                self.encryption_key.len()
            )));
        }
        if self.encryption_iv.len() != IV_LEN {
            return Err(NoteVaultError::InvalidConfiguration(format!(
                "must provide a {IV_LEN} byte {ENV_PREFIX}ENCRYPTION_IV (got {} bytes)",
                self.encryption_iv.len()
            )));
        }
        self.argon2_params().validate()
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }

    /// Build the note cipher from the configured key and IV.
    pub fn cipher(&self) -> Result<NoteCipher> {
        NoteCipher::new(self.encryption_key.as_bytes(), self.encryption_iv.as_bytes())
    }

    /// Resolve the database path against `base_dir` when relative.
    pub fn db_path(&self, base_dir: &Path) -> PathBuf {
        let db_file = Path::new(&self.db_file);
        if db_file.is_absolute() {
            db_file.to_path_buf()
        } else {
            base_dir.join(db_file)
        }
    }
}

fn secret_value<F>(var: &F, field: &str) -> Result<Option<String>>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = var(field) {
        return Ok(Some(value));
    }

    let Some(path) = var(&format!("{field}_FILE")) else {
        return Ok(None);
    };

    let contents = std::fs::read_to_string(&path).map_err(|e| {
        NoteVaultError::ConfigError(format!("cannot read {ENV_PREFIX}{field}_FILE ({path}): {e}"))
    })?;

    // Editors usually leave one trailing newline in secret files.
    let trimmed = contents
        .strip_suffix("\r\n")
        .or_else(|| contents.strip_suffix('\n'))
        .unwrap_or(&contents);

    Ok(Some(trimmed.to_string()))
}

fn parse_number(field: &str, value: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| {
        NoteVaultError::ConfigError(format!(
            "{ENV_PREFIX}{field} must be a non-negative integer (got '{value}')"
        ))
    })
}

fn parse_bool(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(NoteVaultError::ConfigError(format!(
            "{ENV_PREFIX}{field} must be true or false (got '{value}')"
        ))),
    }
}

// ── Tests ────────────────────────────────────────────────────────────
