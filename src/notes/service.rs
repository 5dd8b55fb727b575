//! Note use-case service.
//!
//! # Responsibility
//! - Provide create/get/list/update/delete for notes.
//! - Encrypt secure note values before they reach storage and decrypt
//!   them on the way back out.
//!
//! # Invariants
//! - Callers only ever observe plaintext values.
//! - Encryption happens before storage is touched; a cipher failure
//!   leaves storage unchanged.
//! - `get_all` aborts on the first note that fails to decrypt.
//! - `delete_by_id` is idempotent while `get_by_id`/`update` report
//!   `NotFound`.

use log::{debug, warn};

use crate::crypto::NoteCipher;
use crate::errors::Result;

use super::model::{Note, NoteInput};
use super::store::NoteStore;

/// Note service facade over a storage implementation.
pub struct NoteService<S: NoteStore> {
    store: S,
    cipher: NoteCipher,
}

impl<S: NoteStore> NoteService<S> {
    /// Creates a service using the provided store and cipher.
    pub fn new(store: S, cipher: NoteCipher) -> Self {
        Self { store, cipher }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a note, encrypting its value first when `secure` is set.
    pub fn create(&self, input: NoteInput) -> Result<Note> {
        let plaintext = input.value.clone();
        let to_store = self.seal(input)?;

        let mut saved = self.store.create(to_store)?;
        debug!(
            "event=note_create module=notes status=ok id={} secure={}",
            saved.id, saved.secure
        );

        saved.value = plaintext;
        Ok(saved)
    }

    /// Gets one note by id with its value in plaintext.
    pub fn get_by_id(&self, id: &str) -> Result<Note> {
        let note = self.store.get_by_id(id)?;
        self.open(note)
    }

    /// Lists every note with values in plaintext.
    pub fn get_all(&self) -> Result<Vec<Note>> {
        let notes = self.store.get_all()?;
        let count = notes.len();

        let opened = notes
            .into_iter()
            .map(|note| self.open(note))
            .collect::<Result<Vec<_>>>()?;

        debug!("event=note_list module=notes status=ok count={count}");
        Ok(opened)
    }

    /// Replaces an existing note.  The id must already exist.
    pub fn update(&self, note: Note) -> Result<Note> {
        let plaintext = note.value.clone();
        let to_store = if note.secure {
            Note {
                value: self.cipher.encrypt(note.value.as_bytes())?,
                ..note
            }
        } else {
            note
        };

        let mut saved = self.store.update(to_store)?;
        debug!(
            "event=note_update module=notes status=ok id={} secure={}",
            saved.id, saved.secure
        );

        saved.value = plaintext;
        Ok(saved)
    }

    /// Deletes a note.  Unknown ids are not an error.
    pub fn delete_by_id(&self, id: &str) -> Result<()> {
        self.store.delete_by_id(id)?;
        debug!("event=note_delete module=notes status=ok id={id}");
        Ok(())
    }

    fn seal(&self, input: NoteInput) -> Result<NoteInput> {
        if !input.secure {
            return Ok(input);
        }
        Ok(NoteInput {
            value: self.cipher.encrypt(input.value.as_bytes())?,
            ..input
        })
    }

    fn open(&self, mut note: Note) -> Result<Note> {
        if note.secure {
            note.value = self.cipher.decrypt(&note.value).map_err(|e| {
                warn!(
                    "event=note_decrypt module=notes status=error id={}",
                    note.id
                );
                e
            })?;
        }
        Ok(note)
    }
}
