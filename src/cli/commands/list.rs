//! `securevault list`: display entries in a table.

use crate::cli::output;
use crate::cli::Context;
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(ctx: &Context, category: Option<&str>, show_passwords: bool) -> Result<()> {
    let mut session = ctx.unlock_session()?;
    let entries = session.entries(category);

    match category.filter(|c| !c.is_empty()) {
        Some(cat) => output::info(&format!("{} entr(ies) in '{cat}'", entries.len())),
        None => output::info(&format!("{} entr(ies)", entries.len())),
    }
    output::print_entries_table(&entries, show_passwords);

    if session.entry_count() == 0 {
        output::tip("Run `securevault add <NAME>` to add your first entry.");
    }

    session.lock();
    Ok(())
}
