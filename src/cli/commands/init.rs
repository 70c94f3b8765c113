//! `securevault init`: create a new, empty vault.

use crate::cli::output;
use crate::cli::{prompt_new_password, Context};
use crate::errors::{Result, SecureVaultError};
use crate::vault::VaultSession;

/// Execute the `init` command.
pub fn execute(ctx: &Context) -> Result<()> {
    let mut session = VaultSession::new(&ctx.vault_path);

    // Check before prompting so the user doesn't type a password for nothing.
    if session.exists() {
        output::tip("Use `securevault add <NAME>` to add entries to the existing vault.");
        return Err(SecureVaultError::VaultAlreadyExists(ctx.vault_path.clone()));
    }

    let password = prompt_new_password()?;
    session.init(&password)?;
    session.lock();

    output::success(&format!("Vault created at {}", ctx.vault_path.display()));
    output::tip("Run `securevault add <NAME>` to store your first password.");
    output::tip("Run `securevault list` to see all entries.");

    Ok(())
}
