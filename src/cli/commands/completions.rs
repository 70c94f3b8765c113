//! `securevault completions`: generate shell completion scripts.
//!
//! Usage:
//!   securevault completions bash > ~/.bash_completion.d/securevault
//!   securevault completions zsh

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;

/// Execute the `completions` command.
pub fn execute(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
