//! Store selection.
//!
//! `StoreBackend` is the one place that knows which adapter is in use;
//! services only see the `NoteStore`/`AccountStore` contracts.

use log::info;

use crate::accounts::{AccountInput, AccountStore, StoredAccount};
use crate::config::{Settings, StoreKind};
use crate::errors::Result;
#[cfg(not(feature = "sqlite-store"))]
use crate::errors::NoteVaultError;
use crate::notes::{Note, NoteInput, NoteStore};

use super::memory::MemoryStore;
#[cfg(feature = "sqlite-store")]
use super::sqlite::SqliteStore;

/// A storage adapter chosen at startup.
#[derive(Clone)]
pub enum StoreBackend {
    Memory(MemoryStore),
    #[cfg(feature = "sqlite-store")]
    Sqlite(SqliteStore),
}

impl StoreBackend {
    /// Open the adapter named by `settings.store_type`.
    ///
    /// A relative `db_file` is resolved against `base_dir`.
    pub fn open(settings: &Settings, base_dir: &std::path::Path) -> Result<Self> {
        match settings.store_type {
            StoreKind::Memory => {
                info!("event=store_open module=store status=ok kind=memory");
                Ok(Self::Memory(MemoryStore::new()))
            }
            #[cfg(feature = "sqlite-store")]
            StoreKind::Sqlite => {
                let path = settings.db_path(base_dir);
                let store = SqliteStore::open(&path, settings.delete_on_startup)?;
                Ok(Self::Sqlite(store))
            }
            #[cfg(not(feature = "sqlite-store"))]
            StoreKind::Sqlite => {
                let _ = base_dir;
                Err(NoteVaultError::InvalidConfiguration(
                    "sqlite support not compiled; rebuild with `--features sqlite-store`".into(),
                ))
            }
        }
    }
}

impl NoteStore for StoreBackend {
    fn get_by_id(&self, id: &str) -> Result<Note> {
        match self {
            Self::Memory(s) => NoteStore::get_by_id(s, id),
            #[cfg(feature = "sqlite-store")]
            Self::Sqlite(s) => NoteStore::get_by_id(s, id),
        }
    }

    fn get_all(&self) -> Result<Vec<Note>> {
        match self {
            Self::Memory(s) => s.get_all(),
            #[cfg(feature = "sqlite-store")]
            Self::Sqlite(s) => s.get_all(),
        }
    }

    fn create(&self, input: NoteInput) -> Result<Note> {
        match self {
            Self::Memory(s) => NoteStore::create(s, input),
            #[cfg(feature = "sqlite-store")]
            Self::Sqlite(s) => NoteStore::create(s, input),
        }
    }

    fn update(&self, note: Note) -> Result<Note> {
        match self {
            Self::Memory(s) => s.update(note),
            #[cfg(feature = "sqlite-store")]
            Self::Sqlite(s) => s.update(note),
        }
    }

    fn delete_by_id(&self, id: &str) -> Result<()> {
        match self {
            Self::Memory(s) => s.delete_by_id(id),
            #[cfg(feature = "sqlite-store")]
            Self::Sqlite(s) => s.delete_by_id(id),
        }
    }
}

impl AccountStore for StoreBackend {
    fn get_by_id(&self, id: &str) -> Result<StoredAccount> {
        match self {
            Self::Memory(s) => AccountStore::get_by_id(s, id),
            #[cfg(feature = "sqlite-store")]
            Self::Sqlite(s) => AccountStore::get_by_id(s, id),
        }
    }

    fn get_by_email(&self, email: &str) -> Result<StoredAccount> {
        match self {
            Self::Memory(s) => s.get_by_email(email),
            #[cfg(feature = "sqlite-store")]
            Self::Sqlite(s) => s.get_by_email(email),
        }
    }

    fn create(&self, input: AccountInput) -> Result<StoredAccount> {
        match self {
            Self::Memory(s) => AccountStore::create(s, input),
            #[cfg(feature = "sqlite-store")]
            Self::Sqlite(s) => AccountStore::create(s, input),
        }
    }

    fn delete(&self, id: &str) -> Result<()> {
        match self {
            Self::Memory(s) => AccountStore::delete(s, id),
            #[cfg(feature = "sqlite-store")]
            Self::Sqlite(s) => AccountStore::delete(s, id),
        }
    }
}
