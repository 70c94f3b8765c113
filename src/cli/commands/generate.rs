//! `securevault generate`: print a random password.

use crate::cli::Context;
use crate::errors::Result;
use crate::generator::{generate_password, PasswordOptions};

/// Execute the `generate` command.
pub fn execute(
    ctx: &Context,
    length: Option<usize>,
    no_uppercase: bool,
    no_digits: bool,
    no_symbols: bool,
) -> Result<()> {
    let options = PasswordOptions {
        length: length.unwrap_or(ctx.settings.password_length),
        uppercase: !no_uppercase,
        digits: !no_digits,
        symbols: !no_symbols,
    };

    let password = generate_password(&options)?;
    println!("Generated password: {}", password.as_str());
    Ok(())
}
