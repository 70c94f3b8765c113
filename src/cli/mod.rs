//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;
use zeroize::Zeroizing;

use crate::config::{default_data_dir, Settings};
use crate::errors::{Result, SecureVaultError};
use crate::vault::{VaultSession, MIN_PASSWORD_LEN};

/// Environment variable consulted for the master password before prompting.
pub const PASSWORD_ENV: &str = "SECUREVAULT_PASSWORD";

/// SecureVault CLI: a personal password manager.
#[derive(Parser)]
#[command(name = "securevault", about = "A personal password manager", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file (default: ~/.securevault/vault.enc)
    #[arg(long, env = "SECUREVAULT_VAULT", global = true)]
    pub vault: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate a random password
    Generate {
        /// Password length (default: 16, or `password_length` from config)
        #[arg(short, long)]
        length: Option<usize>,
        /// Exclude uppercase letters
        #[arg(long)]
        no_uppercase: bool,
        /// Exclude digits
        #[arg(long)]
        no_digits: bool,
        /// Exclude symbols
        #[arg(long)]
        no_symbols: bool,
    },

    /// Generate a memorable password
    Memorable {
        /// Number of words (default: 4)
        #[arg(short, long)]
        words: Option<usize>,
        /// Word separator (default: "-")
        #[arg(short, long)]
        separator: Option<String>,
    },

    /// Initialize a new vault
    Init,

    /// Add a new password entry
    Add {
        /// Entry name (e.g. github)
        name: String,
        /// Username or email
        #[arg(short, long, default_value = "")]
        username: String,
        /// Site URL
        #[arg(long, default_value = "")]
        url: String,
        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
        /// Category used by `list --category`
        #[arg(short, long, default_value = "")]
        category: String,
        /// Entry password (omit for interactive prompt)
        #[arg(short, long, conflicts_with = "generate")]
        password: Option<String>,
        /// Generate a random password for the entry
        #[arg(short, long)]
        generate: bool,
    },

    /// List all password entries
    List {
        /// Only show entries in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Show passwords in clear text
        #[arg(long)]
        show_passwords: bool,
    },

    /// Show the entries with a given name
    Get {
        /// Entry name (exact match)
        name: String,
        /// Show the password in clear text
        #[arg(long)]
        show: bool,
    },

    /// Search entries by name, username, or URL
    Search {
        /// Case-insensitive text to look for
        query: String,
        /// Show passwords in clear text
        #[arg(long)]
        show_passwords: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum, ignore_case = true)]
        shell: Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Runtime context resolved once at startup: config plus vault location.
pub struct Context {
    pub settings: Settings,
    pub vault_path: PathBuf,
}

impl Context {
    /// Load settings from the user's data directory and resolve the vault path.
    pub fn load(cli: &Cli) -> Result<Self> {
        Self::load_from(&default_data_dir(), cli.vault.as_deref())
    }

    /// Same as `load`, with an explicit data directory.
    pub fn load_from(data_dir: &Path, vault_override: Option<&Path>) -> Result<Self> {
        let settings = Settings::load(data_dir)?;
        let vault_path = settings.vault_path(data_dir, vault_override);
        Ok(Self {
            settings,
            vault_path,
        })
    }

    /// Open and unlock the vault, prompting for the master password.
    ///
    /// Reports `VaultNotFound` before prompting if no vault exists yet.
    pub fn unlock_session(&self) -> Result<VaultSession> {
        let mut session = VaultSession::new(&self.vault_path);
        if !session.exists() {
            return Err(SecureVaultError::VaultNotFound(self.vault_path.clone()));
        }

        let password = prompt_password()?;
        session.unlock(&password)?;
        Ok(session)
    }
}

/// Get the master password, trying in order:
/// 1. `SECUREVAULT_PASSWORD` env var (scripting)
/// 2. Interactive masked prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| SecureVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used during `init`).
///
/// Also respects `SECUREVAULT_PASSWORD` for scripted usage.
/// Enforces a minimum password length.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        if pw.chars().count() < MIN_PASSWORD_LEN {
            return Err(SecureVaultError::Validation(format!(
                "master password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        return Ok(pw);
    }

    loop {
        let password = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Choose master password")
                .with_confirmation(
                    "Confirm master password",
                    "Passwords do not match, try again",
                )
                .interact()
                .map_err(|e| SecureVaultError::CommandFailed(format!("password prompt: {e}")))?,
        );

        if password.chars().count() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Master password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(password);
    }
}

fn password_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}
