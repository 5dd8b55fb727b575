//! Account records.
//!
//! `StoredAccount` is what storage holds and carries the password hash.
//! `Account` is what callers get back and has no credential material.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque unique account identifier, assigned by storage.
pub type AccountId = String;

/// An account as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
}

/// An account as persisted, including its Argon2id PHC hash.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredAccount {
    pub id: AccountId,
    pub email: String,
    pub password_hash: String,
}

impl fmt::Debug for StoredAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredAccount")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

impl From<StoredAccount> for Account {
    fn from(stored: StoredAccount) -> Self {
        Self {
            id: stored.id,
            email: stored.email,
        }
    }
}

/// The data storage needs to create an account.
///
/// `password_hash` must already be hashed; storage never sees raw passwords.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountInput {
    pub email: String,
    pub password_hash: String,
}

impl fmt::Debug for AccountInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountInput")
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Credentials presented for registration or login.
#[derive(Clone, Deserialize)]
pub struct AccountLoginInput {
    pub email: String,
    pub password: String,
}

impl AccountLoginInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for AccountLoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountLoginInput")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
