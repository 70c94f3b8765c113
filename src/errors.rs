use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in SecureVault.
#[derive(Debug, Error)]
pub enum SecureVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong key or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Vault not found at {0} (run `securevault init` first)")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Invalid vault file: {0}")]
    CorruptVault(String),

    /// Single outward signal for every unlock failure: wrong password,
    /// corrupt container, tampered ciphertext, malformed contents.
    #[error("Invalid master password")]
    InvalidCredentials,

    #[error("Vault is locked")]
    VaultLocked,

    #[error("No entry named '{0}'")]
    EntryNotFound(String),

    #[error("{0}")]
    Validation(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for SecureVault results.
pub type Result<T> = std::result::Result<T, SecureVaultError>;
