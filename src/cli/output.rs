//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Entry;

/// Shown in place of a password unless the user asks to reveal it.
const REDACTED: &str = "********";

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

/// Print entries as a table (Name, Username, Password, URL, Category, Notes).
///
/// Passwords are redacted unless `show_passwords` is set.
pub fn print_entries_table(entries: &[Entry], show_passwords: bool) {
    if entries.is_empty() {
        info("No matching entries.");
        return;
    }

    println!("{}", entries_table(entries, show_passwords));
}

fn entries_table(entries: &[Entry], show_passwords: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Username", "Password", "URL", "Category", "Notes"]);

    for e in entries {
        let password = if show_passwords {
            e.password.as_str()
        } else {
            REDACTED
        };
        table.add_row(vec![
            e.name.as_str(),
            e.username.as_str(),
            password,
            e.url.as_str(),
            e.category.as_str(),
            e.notes.as_str(),
        ]);
    }

    table
}
