//! Persistence contract for notes.
//!
//! Implementations store whatever `value` they are handed.  Encryption
//! is the service's job, so adapters never see key material.

use crate::errors::Result;

use super::model::{Note, NoteInput};

/// Storage operations the note service depends on.
///
/// # Invariants
/// - `get_by_id` and `update` return `NotFound` for unknown or deleted ids.
/// - `get_all` returns an empty vector, not an error, when nothing is stored.
/// - `delete_by_id` is idempotent: unknown ids succeed.
pub trait NoteStore {
    /// Fetch one note by id.
    fn get_by_id(&self, id: &str) -> Result<Note>;
    /// Fetch every live note in insertion order.
    fn get_all(&self) -> Result<Vec<Note>>;
    /// Persist a new note and return it with its assigned id.
    fn create(&self, input: NoteInput) -> Result<Note>;
    /// Replace name, value and secure flag of an existing note.
    fn update(&self, note: Note) -> Result<Note>;
    /// Remove a note.  Succeeds whether or not the id exists.
    fn delete_by_id(&self, id: &str) -> Result<()>;
}
