use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SecureVaultError};

/// Name of the per-user data directory under the home directory.
pub const VAULT_DIR_NAME: &str = ".securevault";

/// Name of the vault file inside the data directory.
pub const VAULT_FILE_NAME: &str = "vault.enc";

/// User-level configuration, loaded from `~/.securevault/config.toml`.
///
/// Every field has a sensible default so SecureVault works out-of-the-box
/// without any config file at all.  Key-derivation parameters are
/// intentionally absent: they are fixed so vault files stay portable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Explicit vault file location (default: `~/.securevault/vault.enc`).
    #[serde(default)]
    pub vault_path: Option<PathBuf>,

    /// Default length for `generate` (default: 16).
    #[serde(default = "default_password_length")]
    pub password_length: usize,

    /// Default word count for `memorable` (default: 4).
    #[serde(default = "default_memorable_words")]
    pub memorable_words: usize,

    /// Default separator for `memorable` (default: "-").
    #[serde(default = "default_word_separator")]
    pub word_separator: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_password_length() -> usize {
    16
}

fn default_memorable_words() -> usize {
    4
}

fn default_word_separator() -> String {
    "-".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_path: None,
            password_length: default_password_length(),
            memorable_words: default_memorable_words(),
            word_separator: default_word_separator(),
        }
    }
}

impl Settings {
    /// Name of the config file inside the data directory.
    const FILE_NAME: &'static str = "config.toml";

    /// Load settings from `<data_dir>/config.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        toml::from_str(&contents).map_err(|e| {
            SecureVaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })
    }

    /// Resolve the vault file path.
    ///
    /// An explicit override wins, then `vault_path` from the config file,
    /// then `<data_dir>/vault.enc`.
    pub fn vault_path(&self, data_dir: &Path, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .or_else(|| self.vault_path.clone())
            .unwrap_or_else(|| data_dir.join(VAULT_FILE_NAME))
    }
}

/// The per-user data directory, `<home>/.securevault`.
///
/// Resolved once at startup and passed down; falls back to the current
/// directory when no home directory can be determined.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(VAULT_DIR_NAME)
}

// ── Tests ────────────────────────────────────────────────────────────
