//! In-memory store for tests and throwaway sessions.
//!
//! Clones share the same data, so one handle can back both the note and
//! the account service.  Deletes are hard deletes.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::accounts::{AccountInput, AccountStore, StoredAccount};
use crate::errors::{NoteVaultError, Result};
use crate::notes::{Note, NoteInput, NoteStore};

#[derive(Debug, Default)]
struct MemoryData {
    notes: Vec<Note>,
    accounts: Vec<StoredAccount>,
}

/// Shared in-memory store implementing both storage contracts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<MemoryData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of notes exactly as stored (ciphertext for secure notes).
    pub fn stored_notes(&self) -> Result<Vec<Note>> {
        Ok(self.read()?.notes.clone())
    }

    /// Insert a note verbatim, bypassing any service logic.
    pub fn insert_note(&self, note: Note) -> Result<()> {
        self.write()?.notes.push(note);
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryData>> {
        self.data
            .read()
            .map_err(|_| NoteVaultError::Storage("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryData>> {
        self.data
            .write()
            .map_err(|_| NoteVaultError::Storage("memory store lock poisoned".into()))
    }
}

impl NoteStore for MemoryStore {
    fn get_by_id(&self, id: &str) -> Result<Note> {
        self.read()?
            .notes
            .iter()
            .find(|note| note.id == id)
            .cloned()
            .ok_or_else(|| NoteVaultError::NotFound(format!("note '{id}'")))
    }

    fn get_all(&self) -> Result<Vec<Note>> {
        Ok(self.read()?.notes.clone())
    }

    fn create(&self, input: NoteInput) -> Result<Note> {
        let note = Note {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            value: input.value,
            secure: input.secure,
        };
        self.write()?.notes.push(note.clone());
        Ok(note)
    }

    fn update(&self, note: Note) -> Result<Note> {
        let mut data = self.write()?;
        let slot = data
            .notes
            .iter_mut()
            .find(|stored| stored.id == note.id)
            .ok_or_else(|| NoteVaultError::NotFound(format!("note '{}'", note.id)))?;
        *slot = note.clone();
        Ok(note)
    }

    fn delete_by_id(&self, id: &str) -> Result<()> {
        self.write()?.notes.retain(|note| note.id != id);
        Ok(())
    }
}

impl AccountStore for MemoryStore {
    fn get_by_id(&self, id: &str) -> Result<StoredAccount> {
        self.read()?
            .accounts
            .iter()
            .find(|account| account.id == id)
            .cloned()
            .ok_or_else(|| NoteVaultError::NotFound(format!("account '{id}'")))
    }

    fn get_by_email(&self, email: &str) -> Result<StoredAccount> {
        self.read()?
            .accounts
            .iter()
            .find(|account| account.email == email)
            .cloned()
            .ok_or_else(|| NoteVaultError::NotFound(format!("account '{email}'")))
    }

    fn create(&self, input: AccountInput) -> Result<StoredAccount> {
        let mut data = self.write()?;
        if data.accounts.iter().any(|a| a.email == input.email) {
            return Err(NoteVaultError::AlreadyExists(format!(
                "account '{}'",
                input.email
            )));
        }

        let account = StoredAccount {
            id: Uuid::new_v4().to_string(),
            email: input.email,
            password_hash: input.password_hash,
        };
        data.accounts.push(account.clone());
        Ok(account)
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.write()?.accounts.retain(|account| account.id != id);
        Ok(())
    }
}
