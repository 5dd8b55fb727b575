//! SQLite-backed store for notes and accounts.
//!
//! Rows are never physically removed: deletes set `deleted = 1` and every
//! read filters on `deleted = 0`, so a deleted row behaves exactly like a
//! missing one.  Emails are unique among live accounts only.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use log::{error, info};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use uuid::Uuid;

use crate::accounts::{AccountInput, AccountStore, StoredAccount};
use crate::errors::{NoteVaultError, Result};
use crate::notes::{Note, NoteInput, NoteStore};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS notes (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    value       TEXT NOT NULL,
    secure      INTEGER NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    deleted     INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS accounts (
    id          TEXT PRIMARY KEY,
    email       TEXT NOT NULL,
    password    TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    deleted     INTEGER NOT NULL DEFAULT 0
);
CREATE UNIQUE INDEX IF NOT EXISTS accounts_live_email
    ON accounts (email) WHERE deleted = 0;
";

const DROP_ALL: &str = "
DROP INDEX IF EXISTS accounts_live_email;
DROP TABLE IF EXISTS notes;
DROP TABLE IF EXISTS accounts;
";

/// SQLite store implementing both storage contracts.
///
/// Clones share one connection.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`.
    ///
    /// With `delete_on_startup`, all tables are dropped and recreated.
    pub fn open(path: &Path, delete_on_startup: bool) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            error!("event=db_open module=store status=error mode=file");
            NoteVaultError::Storage(format!("cannot open {}: {e}", path.display()))
        })?;

        let store = Self::from_connection(conn, delete_on_startup)?;

        // Restrict the database to the owner; it holds password hashes.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(path, perms);
        }

        info!("event=db_open module=store status=ok mode=file");
        Ok(store)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, false)
    }

    fn from_connection(conn: Connection, delete_on_startup: bool) -> Result<Self> {
        if delete_on_startup {
            conn.execute_batch(DROP_ALL)?;
        }
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| NoteVaultError::Storage("sqlite connection lock poisoned".into()))
    }
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get("id")?,
        name: row.get("name")?,
        value: row.get("value")?,
        secure: row.get("secure")?,
    })
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<StoredAccount> {
    Ok(StoredAccount {
        id: row.get("id")?,
        email: row.get("email")?,
        password_hash: row.get("password")?,
    })
}

impl NoteStore for SqliteStore {
    fn get_by_id(&self, id: &str) -> Result<Note> {
        self.conn()?
            .query_row(
                "SELECT id, name, value, secure FROM notes WHERE id = ?1 AND deleted = 0",
                [id],
                note_from_row,
            )
            .optional()?
            .ok_or_else(|| NoteVaultError::NotFound(format!("note '{id}'")))
    }

    fn get_all(&self) -> Result<Vec<Note>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, value, secure FROM notes WHERE deleted = 0 ORDER BY rowid ASC",
        )?;

        let rows = stmt.query_map([], note_from_row)?;

        let mut notes = Vec::new();
        for row in rows {
            notes.push(row?);
        }
        Ok(notes)
    }

    fn create(&self, input: NoteInput) -> Result<Note> {
        let note = Note {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            value: input.value,
            secure: input.secure,
        };
        let ts = now();

        self.conn()?.execute(
            "INSERT INTO notes (id, name, value, secure, created_at, updated_at, deleted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5, 0)",
            params![note.id, note.name, note.value, note.secure, ts],
        )?;

        Ok(note)
    }

    fn update(&self, note: Note) -> Result<Note> {
        let changed = self.conn()?.execute(
            "UPDATE notes
             SET name = ?2, value = ?3, secure = ?4, updated_at = ?5
             WHERE id = ?1 AND deleted = 0",
            params![note.id, note.name, note.value, note.secure, now()],
        )?;

        if changed == 0 {
            return Err(NoteVaultError::NotFound(format!("note '{}'", note.id)));
        }
        Ok(note)
    }

    fn delete_by_id(&self, id: &str) -> Result<()> {
        self.conn()?.execute(
            "UPDATE notes SET deleted = 1, updated_at = ?2 WHERE id = ?1 AND deleted = 0",
            params![id, now()],
        )?;
        Ok(())
    }
}

impl AccountStore for SqliteStore {
    fn get_by_id(&self, id: &str) -> Result<StoredAccount> {
        self.conn()?
            .query_row(
                "SELECT id, email, password FROM accounts WHERE id = ?1 AND deleted = 0",
                [id],
                account_from_row,
            )
            .optional()?
            .ok_or_else(|| NoteVaultError::NotFound(format!("account '{id}'")))
    }

    fn get_by_email(&self, email: &str) -> Result<StoredAccount> {
        self.conn()?
            .query_row(
                "SELECT id, email, password FROM accounts WHERE email = ?1 AND deleted = 0",
                [email],
                account_from_row,
            )
            .optional()?
            .ok_or_else(|| NoteVaultError::NotFound(format!("account '{email}'")))
    }

    fn create(&self, input: AccountInput) -> Result<StoredAccount> {
        let account = StoredAccount {
            id: Uuid::new_v4().to_string(),
            email: input.email,
            password_hash: input.password_hash,
        };
        let ts = now();

        let inserted = self.conn()?.execute(
            "INSERT INTO accounts (id, email, password, created_at, updated_at, deleted)
             VALUES (?1, ?2, ?3, ?4, ?4, 0)",
            params![account.id, account.email, account.password_hash, ts],
        );

        match inserted {
            Ok(_) => Ok(account),
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(NoteVaultError::AlreadyExists(format!(
                    "account '{}'",
                    account.email
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.conn()?.execute(
            "UPDATE accounts SET deleted = 1, updated_at = ?2 WHERE id = ?1 AND deleted = 0",
            params![id, now()],
        )?;
        Ok(())
    }
}
