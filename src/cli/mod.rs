//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::app::App;
use crate::config::Settings;
use crate::crypto::DEFAULT_ALPHABET;
use crate::errors::{NoteVaultError, Result};

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable checked before prompting for a password.
pub const PASSWORD_ENV: &str = "NOTEVAULT_PASSWORD";

/// NoteVault CLI: encrypted notes and accounts.
#[derive(Parser)]
#[command(
    name = "notevault",
    about = "Encrypted notes with account registration and login",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding notevault.toml and the database (default: .)
    #[arg(long, default_value = ".", global = true)]
    pub config_dir: String,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Manage notes (add, get, list, update, delete)
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },

    /// Manage accounts (register, login)
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Generate a random string
    Generate {
        /// Number of characters
        #[arg(short, long, default_value = "16")]
        length: usize,

        /// Characters to draw from
        #[arg(short, long, default_value = DEFAULT_ALPHABET)]
        alphabet: String,
    },

    /// Print a fresh encryption key and IV as environment assignments
    Keygen,
}

/// Note subcommands.
#[derive(clap::Subcommand)]
pub enum NoteAction {
    /// Add a note
    Add {
        /// Note name
        name: String,
        /// Note value (omit for interactive prompt)
        value: Option<String>,
        /// Encrypt the value at rest
        #[arg(short, long)]
        secure: bool,
    },

    /// Print a note's value
    Get {
        /// Note id
        id: String,
    },

    /// List all notes
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Change a note's name, value or secure flag
    Update {
        /// Note id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New value
        #[arg(long)]
        value: Option<String>,
        /// Encrypt (true) or store in plaintext (false)
        #[arg(long)]
        secure: Option<bool>,
    },

    /// Delete a note
    Delete {
        /// Note id
        id: String,
    },
}

/// Account subcommands.
#[derive(clap::Subcommand)]
pub enum AccountAction {
    /// Register a new account
    Register {
        /// Account email
        email: String,
    },

    /// Check an email/password pair
    Login {
        /// Account email
        email: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

impl Cli {
    pub fn config_dir(&self) -> PathBuf {
        PathBuf::from(&self.config_dir)
    }
}

/// Load settings from the config directory plus `NOTEVAULT_*` overrides.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    Settings::load_with_env(&cli.config_dir())
}

/// Build the services from the CLI's config directory.
pub fn open_app(cli: &Cli, settings: &Settings) -> Result<App> {
    App::from_settings(settings, &cli.config_dir())
}

/// Get an existing account password, trying in order:
/// 1. `NOTEVAULT_PASSWORD` env var (CI/CD)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter password")
        .interact()
        .map_err(|e| NoteVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used during `register`).
///
/// Also respects `NOTEVAULT_PASSWORD` for scripted/CI usage.
/// Enforces a minimum password length.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        check_password_length(&pw)?;
        return Ok(pw);
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose password")
            .with_confirmation("Confirm password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| NoteVaultError::CommandFailed(format!("password prompt: {e}")))?;

        if check_password_length(&password).is_err() {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Read a note value interactively, hidden when the note is secure.
pub fn prompt_value(secure: bool) -> Result<Zeroizing<String>> {
    let prompt_error =
        |e: dialoguer::Error| NoteVaultError::CommandFailed(format!("value prompt: {e}"));

    let value = if secure {
        dialoguer::Password::new()
            .with_prompt("Enter note value")
            .allow_empty_password(true)
            .interact()
            .map_err(prompt_error)?
    } else {
        dialoguer::Input::<String>::new()
            .with_prompt("Enter note value")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?
    };

    Ok(Zeroizing::new(value))
}

fn password_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

fn check_password_length(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(NoteVaultError::InvalidInput(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
