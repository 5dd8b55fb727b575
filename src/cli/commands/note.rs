//! `notevault note ...`: add, read, list, update and delete notes.

use crate::app::App;
use crate::cli::{output, prompt_value};
use zeroize::Zeroizing;

use crate::errors::{NoteVaultError, Result};
use crate::notes::NoteInput;

/// Execute `note add`.
pub fn add(app: &App, name: &str, value: Option<&str>, secure: bool) -> Result<()> {
    let value = resolve_value(value, || prompt_value(secure))?;

    let note = app.notes().create(NoteInput::new(name, value, secure))?;

    output::success(&format!("Added note '{}' ({})", note.name, note.id));
    if !secure {
        output::tip("Pass --secure to encrypt a note's value at rest.");
    }
    Ok(())
}

/// Use the given value, or prompt for one.  A prompted value is moved out
/// of its `Zeroizing` wrapper, never copied.
fn resolve_value(
    value: Option<&str>,
    prompt: impl FnOnce() -> Result<Zeroizing<String>>,
) -> Result<String> {
    match value {
        Some(v) => Ok(v.to_string()),
        None => {
            let mut prompted = prompt()?;
            Ok(std::mem::take(&mut *prompted))
        }
    }
}

/// Execute `note get`: print the plaintext value to stdout.
pub fn get(app: &App, id: &str) -> Result<()> {
    let note = app.notes().get_by_id(id)?;
    println!("{}", note.value);
    Ok(())
}

/// Execute `note list`.
pub fn list(app: &App, json: bool) -> Result<()> {
    let notes = app.notes().get_all()?;

    if json {
        let rendered = serde_json::to_string_pretty(&notes)
            .map_err(|e| NoteVaultError::SerializationError(e.to_string()))?;
        println!("{rendered}");
        return Ok(());
    }

    output::print_notes_table(&notes);
    Ok(())
}

/// Execute `note update`: read the note, apply the given changes, write it back.
pub fn update(
    app: &App,
    id: &str,
    name: Option<&str>,
    value: Option<&str>,
    secure: Option<bool>,
) -> Result<()> {
    if name.is_none() && value.is_none() && secure.is_none() {
        return Err(NoteVaultError::InvalidInput(
            "nothing to update: pass --name, --value or --secure".into(),
        ));
    }

    let mut note = app.notes().get_by_id(id)?;
    if let Some(name) = name {
        note.name = name.to_string();
    }
    if let Some(value) = value {
        note.value = value.to_string();
    }
    if let Some(secure) = secure {
        note.secure = secure;
    }

    let updated = app.notes().update(note)?;
    output::success(&format!("Updated note '{}' ({})", updated.name, updated.id));
    Ok(())
}

/// Execute `note delete`.  Deleting an unknown id succeeds.
pub fn delete(app: &App, id: &str) -> Result<()> {
    app.notes().delete_by_id(id)?;
    output::success(&format!("Deleted note {id}"));
    Ok(())
}
