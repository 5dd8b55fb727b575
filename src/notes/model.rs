//! Note records as seen by callers and by storage.
//!
//! The same types travel in both directions.  Whether `value` holds
//! plaintext or base64 ciphertext depends on which side of
//! `NoteService` you are on: storage sees ciphertext for secure notes,
//! callers never do.

use serde::{Deserialize, Serialize};

/// Opaque unique note identifier, assigned by storage.
pub type NoteId = String;

/// A note or password entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,

    /// Display label.
    pub name: String,

    /// The payload.  Encrypted at rest when `secure` is set.
    pub value: String,

    pub secure: bool,
}

/// The data required to create a new note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub secure: bool,
}

impl NoteInput {
    pub fn new(name: impl Into<String>, value: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            secure,
        }
    }
}
