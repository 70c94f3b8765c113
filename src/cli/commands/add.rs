//! `securevault add`: store a new entry in the vault.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::Context;
use crate::errors::{Result, SecureVaultError};
use crate::generator::{generate_password, PasswordOptions};
use crate::vault::Entry;

/// Field values for a new entry, as given on the command line.
pub struct AddArgs<'a> {
    pub name: &'a str,
    pub username: &'a str,
    pub url: &'a str,
    pub notes: &'a str,
    pub category: &'a str,
    pub password: Option<&'a str>,
    pub generate: bool,
}

/// Execute the `add` command.
pub fn execute(ctx: &Context, args: &AddArgs<'_>) -> Result<()> {
    // Determine the entry password from one of four sources.
    let entry_password = if let Some(pw) = args.password {
        // Source 1: Inline value on the command line.
        output::warning("Password provided on command line — it may appear in shell history.");
        Zeroizing::new(pw.to_string())
    } else if args.generate {
        // Source 2: Freshly generated.
        let options = PasswordOptions {
            length: ctx.settings.password_length,
            ..PasswordOptions::default()
        };
        generate_password(&options)?
    } else if !io::stdin().is_terminal() {
        // Source 3: Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        Zeroizing::new(buf.trim_end().to_string())
    } else {
        // Source 4: Interactive secure prompt (default).
        Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt(format!("Password for {}", args.name))
                .interact()
                .map_err(|e| SecureVaultError::CommandFailed(format!("input prompt: {e}")))?,
        )
    };

    let mut session = ctx.unlock_session()?;

    let entry = Entry::new(args.name, args.username, entry_password.as_str())
        .with_url(args.url)
        .with_notes(args.notes)
        .with_category(args.category);
    session.add_entry(entry)?;

    output::success(&format!(
        "Entry '{}' added ({} total)",
        args.name,
        session.entry_count()
    ));
    if args.generate {
        output::tip("Run `securevault get <NAME> --show` to reveal the generated password.");
    }

    session.lock();
    Ok(())
}
