//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::notes::Note;

/// Plain values longer than this are cut in the table view.
const MAX_TABLE_VALUE_CHARS: usize = 40;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of notes (ID, Name, Value, Secure).
///
/// Secure values are masked; use `note get` to reveal one.
pub fn print_notes_table(notes: &[Note]) {
    if notes.is_empty() {
        info("No notes yet.");
        tip("Run `notevault note add <NAME>` to add your first note.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name", "Value", "Secure"]);

    for note in notes {
        table.add_row(vec![
            note.id.clone(),
            note.name.clone(),
            display_value(note),
            if note.secure { "yes" } else { "no" }.to_string(),
        ]);
    }

    println!("{table}");
}

fn display_value(note: &Note) -> String {
    if note.secure {
        return "********".to_string();
    }

    let mut shown: String = note.value.chars().take(MAX_TABLE_VALUE_CHARS).collect();
    if note.value.chars().count() > MAX_TABLE_VALUE_CHARS {
        shown.push_str("...");
    }
    shown
}
