//! `securevault search`: find entries by name, username, or URL.

use crate::cli::output;
use crate::cli::Context;
use crate::errors::Result;

/// Execute the `search` command.
pub fn execute(ctx: &Context, query: &str, show_passwords: bool) -> Result<()> {
    let mut session = ctx.unlock_session()?;
    let entries = session.search(query);
    session.lock();

    output::info(&format!("{} match(es) for '{query}'", entries.len()));
    output::print_entries_table(&entries, show_passwords);
    Ok(())
}
