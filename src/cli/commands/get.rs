//! `securevault get`: show the entries with a given name.

use crate::cli::output;
use crate::cli::Context;
use crate::errors::{Result, SecureVaultError};

/// Execute the `get` command.
pub fn execute(ctx: &Context, name: &str, show: bool) -> Result<()> {
    let mut session = ctx.unlock_session()?;
    let entries = session.find(name);
    session.lock();

    if entries.is_empty() {
        return Err(SecureVaultError::EntryNotFound(name.to_string()));
    }
    output::print_entries_table(&entries, show);
    Ok(())
}
