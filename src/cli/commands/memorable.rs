//! `securevault memorable`: print a password made of random words.

use crate::cli::Context;
use crate::errors::Result;
use crate::generator::generate_memorable;

/// Execute the `memorable` command.
pub fn execute(ctx: &Context, words: Option<usize>, separator: Option<&str>) -> Result<()> {
    let count = words.unwrap_or(ctx.settings.memorable_words);
    let separator = separator.unwrap_or(&ctx.settings.word_separator);

    println!("Memorable password: {}", generate_memorable(count, separator));
    Ok(())
}
