//! Lock/unlock state machine around a single vault file.
//!
//! A `VaultSession` starts `Locked`.  `init` or a successful `unlock`
//! moves it to `Unlocked`, which is the only state that holds a derived
//! key and decrypted entries.  `lock` drops both; the key and every
//! entry wipe themselves on drop.
//!
//! Every mutation re-encrypts the whole store and rewrites the file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use super::entry::Entry;
use super::format;
use super::store::EntryStore;
use crate::crypto::{decrypt, derive_key, encrypt, generate_salt, DerivedKey, Salt};
use crate::errors::{Result, SecureVaultError};

/// Minimum master password length accepted by `init`.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Session over the vault file at one path.
pub struct VaultSession {
    path: PathBuf,
    state: SessionState,
}

enum SessionState {
    Locked,
    Unlocked(UnlockedVault),
}

/// Everything that exists only while the vault is open.
///
/// Encryption is only reachable through this type, so there is no way
/// to seal a store without a derived key.
struct UnlockedVault {
    salt: Salt,
    key: DerivedKey,
    store: EntryStore,
}

impl UnlockedVault {
    /// Encrypt the current store and atomically replace the vault file.
    fn persist(&self, path: &Path) -> Result<()> {
        let plaintext = self.store.to_json()?;
        let ciphertext = encrypt(&self.key, &plaintext)?;
        format::write_vault(path, &self.salt, &ciphertext)
    }
}

impl VaultSession {
    /// Create a locked session for the vault file at `path`.
    ///
    /// Nothing is read from disk until `init` or `unlock`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: SessionState::Locked,
        }
    }

    /// Create a brand-new vault and leave the session unlocked.
    ///
    /// Never overwrites: fails with `VaultAlreadyExists` if anything is
    /// already at the path.
    pub fn init(&mut self, master_password: &str) -> Result<()> {
        if self.path.exists() {
            return Err(SecureVaultError::VaultAlreadyExists(self.path.clone()));
        }
        validate_master_password(master_password)?;
        ensure_vault_dir(&self.path)?;

        let salt = generate_salt();
        let key = derive_key(master_password.as_bytes(), &salt)?;
        let vault = UnlockedVault {
            salt,
            key,
            store: EntryStore::new(),
        };
        vault.persist(&self.path)?;

        self.state = SessionState::Unlocked(vault);
        info!(path = %self.path.display(), "vault created");
        Ok(())
    }

    /// Open the vault with the master password.
    ///
    /// A missing file, a corrupt container, a wrong password, tampered
    /// ciphertext and malformed contents all produce the same
    /// `InvalidCredentials` error.  Only genuine I/O failures are
    /// reported separately.  On failure the session keeps its prior state.
    pub fn unlock(&mut self, master_password: &str) -> Result<()> {
        let file = match format::read_vault(&self.path) {
            Ok(file) => file,
            Err(SecureVaultError::Io(e)) => return Err(SecureVaultError::Io(e)),
            Err(e) => {
                warn!(path = %self.path.display(), reason = %e, "unlock rejected");
                return Err(SecureVaultError::InvalidCredentials);
            }
        };

        let key = derive_key(master_password.as_bytes(), &file.salt)?;
        let store = match decrypt_and_parse(&key, &file.ciphertext) {
            Ok(store) => store,
            Err(e) => {
                warn!(path = %self.path.display(), "unlock rejected");
                return Err(e);
            }
        };

        debug!(entries = store.len(), "vault unlocked");
        self.state = SessionState::Unlocked(UnlockedVault {
            salt: file.salt,
            key,
            store,
        });
        Ok(())
    }

    /// Drop the key and all decrypted entries.  Safe to call repeatedly.
    pub fn lock(&mut self) {
        if matches!(self.state, SessionState::Unlocked(_)) {
            debug!("vault locked");
        }
        self.state = SessionState::Locked;
    }

    /// Append an entry and immediately persist the whole vault.
    ///
    /// If the write fails the entry is taken back out, so memory and
    /// disk stay in agreement.
    pub fn add_entry(&mut self, entry: Entry) -> Result<()> {
        let SessionState::Unlocked(vault) = &mut self.state else {
            return Err(SecureVaultError::VaultLocked);
        };

        vault.store.add(entry);
        if let Err(e) = vault.persist(&self.path) {
            vault.store.pop();
            return Err(e);
        }

        debug!(entries = vault.store.len(), "entry added");
        Ok(())
    }

    /// Entries in insertion order, optionally filtered by category.
    ///
    /// Empty while locked.
    pub fn entries(&self, category: Option<&str>) -> Vec<Entry> {
        self.store().map_or_else(Vec::new, |s| s.list(category))
    }

    /// Case-insensitive search over name, username and url.
    ///
    /// Empty while locked.
    pub fn search(&self, query: &str) -> Vec<Entry> {
        self.store().map_or_else(Vec::new, |s| s.search(query))
    }

    /// Entries whose name matches exactly.  Empty while locked.
    pub fn find(&self, name: &str) -> Vec<Entry> {
        self.store().map_or_else(Vec::new, |s| s.find(name))
    }

    /// Number of entries; `0` while locked.
    pub fn entry_count(&self) -> usize {
        self.store().map_or(0, EntryStore::len)
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self.state, SessionState::Unlocked(_))
    }

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if a vault file exists at the session's path.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn store(&self) -> Option<&EntryStore> {
        match &self.state {
            SessionState::Unlocked(vault) => Some(&vault.store),
            SessionState::Locked => None,
        }
    }
}

/// Decrypt the cipher blob and decode the entry JSON.
///
/// Any failure collapses into `InvalidCredentials`; callers cannot tell a
/// wrong key from tampered bytes or a malformed payload.
fn decrypt_and_parse(key: &DerivedKey, ciphertext: &[u8]) -> Result<EntryStore> {
    let plaintext = decrypt(key, ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| SecureVaultError::InvalidCredentials)?;
    EntryStore::from_json(&plaintext).map_err(|_| SecureVaultError::InvalidCredentials)
}

fn validate_master_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SecureVaultError::Validation(format!(
            "master password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Create the vault's parent directory (owner-only on Unix) if missing.
fn ensure_vault_dir(path: &Path) -> Result<()> {
    let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return Ok(());
    };
    if dir.exists() {
        return Ok(());
    }

    fs::create_dir_all(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    }

    debug!(dir = %dir.display(), "created vault directory");
    Ok(())
}
