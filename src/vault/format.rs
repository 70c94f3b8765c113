//! Binary vault file format.
//!
//! A vault file has this layout:
//!
//! ```text
//! [salt: 16 bytes][version: 1 byte][nonce: 12 bytes][ciphertext + tag]
//! ```
//!
//! - **Salt**: the Argon2id salt, stored in the clear.  The first 16
//!   bytes are always exactly the salt the rest of the file was
//!   encrypted under.
//! - **Version**: format version (currently `1`).
//! - **Cipher blob**: output of `crypto::encrypt` (nonce-prefixed
//!   AES-256-GCM ciphertext of the entry JSON).

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::crypto::keys::{Salt, SALT_LEN};
use crate::errors::{Result, SecureVaultError};

/// Current binary format version.
pub const CURRENT_VERSION: u8 = 1;

/// Fixed-size prefix: 16 (salt) + 1 (version).
const PREFIX_LEN: usize = SALT_LEN + 1;

/// The two parts of a vault file, as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultFile {
    pub salt: Salt,
    /// The cipher blob following the version byte.
    pub ciphertext: Vec<u8>,
}

/// Read a vault file and split it into salt and ciphertext.
///
/// Fails with `VaultNotFound` if nothing exists at `path` and with
/// `CorruptVault` if the file is too short or has an unknown version.
pub fn read_vault(path: &Path) -> Result<VaultFile> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(SecureVaultError::VaultNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    if data.len() < PREFIX_LEN {
        return Err(SecureVaultError::CorruptVault(format!(
            "file is {} bytes, shorter than the {PREFIX_LEN}-byte header",
            data.len()
        )));
    }

    let (salt_bytes, rest) = data.split_at(SALT_LEN);
    let version = rest[0];
    if version != CURRENT_VERSION {
        return Err(SecureVaultError::CorruptVault(format!(
            "unsupported version {version}, expected {CURRENT_VERSION}"
        )));
    }

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(salt_bytes);

    debug!(path = %path.display(), bytes = data.len(), "read vault file");

    Ok(VaultFile {
        salt,
        ciphertext: rest[1..].to_vec(),
    })
}

/// Write a vault file to disk **atomically**.
///
/// 1. Write salt + version + ciphertext to a temp file in the same directory.
/// 2. Flush it to stable storage.
/// 3. Rename the temp file over the target path.
///
/// The rename ensures readers never see a half-written file.
pub fn write_vault(path: &Path, salt: &Salt, ciphertext: &[u8]) -> Result<()> {
    let mut buf = Vec::with_capacity(PREFIX_LEN + ciphertext.len());
    buf.extend_from_slice(salt); // 16 bytes
    buf.push(CURRENT_VERSION); // 1 byte
    buf.extend_from_slice(ciphertext);

    let tmp_path = temp_path(path);
    if let Err(e) = write_and_sync(&tmp_path, &buf) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    debug!(path = %path.display(), bytes = buf.len(), "wrote vault file");
    Ok(())
}

/// Sibling temp file: `<dir>/.<name>.tmp`.
///
/// Same directory as the target so the rename stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}

fn write_and_sync(tmp_path: &Path, buf: &[u8]) -> Result<()> {
    let mut file = File::create(tmp_path)?;

    // Owner-only read/write before any secret bytes land in the file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(buf)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_then_read_returns_same_parts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.enc");
        let salt = [0x5Au8; SALT_LEN];

        write_vault(&path, &salt, b"opaque-cipher-blob").unwrap();

        let raw = fs::read(&path).unwrap();
        assert_eq!(&raw[..SALT_LEN], &salt);
        assert_eq!(raw[SALT_LEN], CURRENT_VERSION);

        let file = read_vault(&path).unwrap();
        assert_eq!(file.salt, salt);
        assert_eq!(file.ciphertext, b"opaque-cipher-blob");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = read_vault(&dir.path().join("nope.enc"));
        assert!(matches!(result, Err(SecureVaultError::VaultNotFound(_))));
    }

    #[test]
    fn short_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("short.enc");
        fs::write(&path, [0u8; SALT_LEN - 1]).unwrap();
        assert!(matches!(
            read_vault(&path),
            Err(SecureVaultError::CorruptVault(_))
        ));

        // Salt alone, without the version byte, is still too short.
        fs::write(&path, [0u8; SALT_LEN]).unwrap();
        assert!(matches!(
            read_vault(&path),
            Err(SecureVaultError::CorruptVault(_))
        ));
    }

    #[test]
    fn unknown_version_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("future.enc");
        let mut data = vec![0u8; SALT_LEN];
        data.push(CURRENT_VERSION + 1);
        data.extend_from_slice(b"blob");
        fs::write(&path, data).unwrap();

        assert!(matches!(
            read_vault(&path),
            Err(SecureVaultError::CorruptVault(_))
        ));
    }

    #[test]
    fn overwrite_replaces_whole_file_and_leaves_no_temp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.enc");
        let salt = [1u8; SALT_LEN];

        write_vault(&path, &salt, &[0xAA; 64]).unwrap();
        write_vault(&path, &salt, &[0xBB; 8]).unwrap();

        let file = read_vault(&path).unwrap();
        assert_eq!(file.ciphertext, vec![0xBB; 8]);
        assert!(!dir.path().join(".vault.enc.tmp").exists());
    }

    #[test]
    fn failed_write_leaves_existing_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.enc");
        let salt = [2u8; SALT_LEN];
        write_vault(&path, &salt, b"original").unwrap();
        let before = fs::read(&path).unwrap();

        // A directory squatting on the temp path makes the write fail.
        fs::create_dir(dir.path().join(".vault.enc.tmp")).unwrap();
        assert!(write_vault(&path, &salt, b"replacement").is_err());

        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[cfg(unix)]
    #[test]
    fn vault_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.enc");
        write_vault(&path, &[3u8; SALT_LEN], b"x").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
