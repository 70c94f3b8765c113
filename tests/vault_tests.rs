//! Integration tests for the SecureVault vault module.

use std::fs;

use securevault::crypto::{decrypt, derive_key, SALT_LEN};
use securevault::errors::SecureVaultError;
use securevault::vault::{format, Entry, EntryStore, VaultSession};
use tempfile::TempDir;

const PASSWORD: &str = "correct-master-pw";

/// Helper: create a temporary vault file path inside a fresh temp dir.
fn vault_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("vault.enc");
    (dir, path)
}

fn sample_entries() -> Vec<Entry> {
    vec![
        Entry::new("GitHub", "alice", "gh-pass")
            .with_url("https://github.com")
            .with_category("work"),
        Entry::new("Mail", "bob@echo.com", "mail-pass")
            .with_url("https://mail.example")
            .with_notes("recovery codes in safe")
            .with_category("personal"),
        Entry::new("Bank", "carol", "bank-pass")
            .with_notes("echo is the security answer")
            .with_category("personal"),
        // Duplicate name + username is allowed.
        Entry::new("GitHub", "alice", "gh-pass-2"),
    ]
}

/// Helper: initialize a vault at `path` holding `sample_entries()`, then lock it.
fn populated_vault(path: &std::path::Path) -> VaultSession {
    let mut session = VaultSession::new(path);
    session.init(PASSWORD).expect("init");
    for entry in sample_entries() {
        session.add_entry(entry).expect("add entry");
    }
    session.lock();
    session
}

// ---------------------------------------------------------------------------
// Round-trip
// ---------------------------------------------------------------------------

#[test]
fn entries_survive_lock_and_unlock() {
    let (_dir, path) = vault_path();
    let mut session = populated_vault(&path);

    session.unlock(PASSWORD).expect("unlock");
    assert_eq!(session.entries(None), sample_entries());
}

#[test]
fn fresh_session_reads_what_another_wrote() {
    let (_dir, path) = vault_path();
    populated_vault(&path);

    let mut other = VaultSession::new(&path);
    other.unlock(PASSWORD).expect("unlock");
    assert_eq!(other.entry_count(), 4);
    assert_eq!(other.entries(None), sample_entries());
}

#[test]
fn every_add_is_persisted_immediately() {
    let (_dir, path) = vault_path();
    let mut session = VaultSession::new(&path);
    session.init(PASSWORD).unwrap();

    session
        .add_entry(Entry::new("one", "u1", "p1"))
        .unwrap();

    // No explicit save: a second session must already see the entry.
    let mut reader = VaultSession::new(&path);
    reader.unlock(PASSWORD).unwrap();
    assert_eq!(reader.find("one").len(), 1);
}

#[test]
fn init_leaves_session_unlocked_with_empty_store() {
    let (_dir, path) = vault_path();
    let mut session = VaultSession::new(&path);

    session.init(PASSWORD).unwrap();
    assert!(session.is_unlocked());
    assert_eq!(session.entry_count(), 0);

    let mut reader = VaultSession::new(&path);
    reader.unlock(PASSWORD).unwrap();
    assert!(reader.entries(None).is_empty());
}

// ---------------------------------------------------------------------------
// Wrong password
// ---------------------------------------------------------------------------

#[test]
fn wrong_password_is_rejected_and_session_stays_locked() {
    let (_dir, path) = vault_path();
    let mut session = populated_vault(&path);

    let result = session.unlock("wrong-master-pw");
    assert!(matches!(result, Err(SecureVaultError::InvalidCredentials)));
    assert!(!session.is_unlocked());
    assert!(session.entries(None).is_empty());
    assert!(session.search("").is_empty());
}

#[test]
fn missing_vault_looks_like_bad_credentials() {
    let (_dir, path) = vault_path();
    let mut session = VaultSession::new(&path);

    assert!(!session.exists());
    assert!(matches!(
        session.unlock(PASSWORD),
        Err(SecureVaultError::InvalidCredentials)
    ));
}

#[test]
fn truncated_vault_looks_like_bad_credentials() {
    let (_dir, path) = vault_path();
    fs::write(&path, [0u8; 10]).unwrap();

    let mut session = VaultSession::new(&path);
    assert!(matches!(
        session.unlock(PASSWORD),
        Err(SecureVaultError::InvalidCredentials)
    ));
}

#[test]
fn failed_unlock_keeps_an_open_session_open() {
    let (_dir, path) = vault_path();
    let mut session = populated_vault(&path);
    session.unlock(PASSWORD).unwrap();

    assert!(session.unlock("wrong-master-pw").is_err());
    assert!(session.is_unlocked());
    assert_eq!(session.entry_count(), 4);
}

// ---------------------------------------------------------------------------
// Tamper detection
// ---------------------------------------------------------------------------

#[test]
fn flipping_any_ciphertext_byte_breaks_unlock() {
    let (_dir, path) = vault_path();
    let mut session = VaultSession::new(&path);
    session.init(PASSWORD).unwrap();
    session
        .add_entry(Entry::new("site", "user", "pw"))
        .unwrap();
    session.lock();

    let original = fs::read(&path).unwrap();

    // A few positions across the version byte, nonce, body and tag.
    let len = original.len();
    for pos in [SALT_LEN, SALT_LEN + 1, SALT_LEN + 13, len / 2, len - 1] {
        let mut tampered = original.clone();
        tampered[pos] ^= 0xFF;
        fs::write(&path, &tampered).unwrap();

        let mut victim = VaultSession::new(&path);
        assert!(
            matches!(
                victim.unlock(PASSWORD),
                Err(SecureVaultError::InvalidCredentials)
            ),
            "tampering at byte {pos} must be detected"
        );
        assert!(!victim.is_unlocked());
    }
}

#[test]
fn tampered_salt_breaks_unlock() {
    let (_dir, path) = vault_path();
    populated_vault(&path);

    let mut data = fs::read(&path).unwrap();
    data[0] ^= 0x01;
    fs::write(&path, &data).unwrap();

    let mut session = VaultSession::new(&path);
    assert!(session.unlock(PASSWORD).is_err());
}

// ---------------------------------------------------------------------------
// Salt determinism
// ---------------------------------------------------------------------------

#[test]
fn file_prefix_is_the_salt_that_opens_the_rest() {
    let (_dir, path) = vault_path();
    populated_vault(&path);

    let raw = fs::read(&path).unwrap();
    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&raw[..SALT_LEN]);

    let file = format::read_vault(&path).unwrap();
    assert_eq!(file.salt, salt);

    let key = derive_key(PASSWORD.as_bytes(), &salt).unwrap();
    let plaintext = decrypt(&key, &file.ciphertext).expect("re-derived key decrypts");
    let store = EntryStore::from_json(&plaintext).unwrap();
    assert_eq!(store.list(None), sample_entries());
}

#[test]
fn salt_does_not_change_across_saves() {
    let (_dir, path) = vault_path();
    let mut session = VaultSession::new(&path);
    session.init(PASSWORD).unwrap();
    let salt_before = format::read_vault(&path).unwrap().salt;

    session
        .add_entry(Entry::new("a", "b", "c"))
        .unwrap();
    session
        .add_entry(Entry::new("d", "e", "f"))
        .unwrap();

    assert_eq!(format::read_vault(&path).unwrap().salt, salt_before);
}

#[test]
fn separate_vaults_get_separate_salts() {
    let (_dir1, path1) = vault_path();
    let (_dir2, path2) = vault_path();
    VaultSession::new(&path1).init(PASSWORD).unwrap();
    VaultSession::new(&path2).init(PASSWORD).unwrap();

    assert_ne!(
        format::read_vault(&path1).unwrap().salt,
        format::read_vault(&path2).unwrap().salt
    );
}

// ---------------------------------------------------------------------------
// Search and list semantics
// ---------------------------------------------------------------------------

#[test]
fn search_matches_username_but_not_notes() {
    let (_dir, path) = vault_path();
    let mut session = populated_vault(&path);
    session.unlock(PASSWORD).unwrap();

    let hits = session.search("ECHO");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].username, "bob@echo.com");
}

#[test]
fn search_preserves_insertion_order() {
    let (_dir, path) = vault_path();
    let mut session = populated_vault(&path);
    session.unlock(PASSWORD).unwrap();

    let hits = session.search("github");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].password, "gh-pass");
    assert_eq!(hits[1].password, "gh-pass-2");
}

#[test]
fn list_by_category_and_defensive_copy() {
    let (_dir, path) = vault_path();
    let mut session = populated_vault(&path);
    session.unlock(PASSWORD).unwrap();

    let mut personal = session.entries(Some("personal"));
    assert_eq!(personal.len(), 2);
    assert_eq!(personal[0].name, "Mail");

    personal.clear();
    assert_eq!(session.entries(Some("personal")).len(), 2);
}

// ---------------------------------------------------------------------------
// Lock
// ---------------------------------------------------------------------------

#[test]
fn lock_is_idempotent() {
    let (_dir, path) = vault_path();
    let mut session = populated_vault(&path);
    session.unlock(PASSWORD).unwrap();

    session.lock();
    assert!(!session.is_unlocked());
    assert!(session.entries(None).is_empty());
    assert!(session.search("git").is_empty());
    assert!(session.find("GitHub").is_empty());

    session.lock();
    assert!(!session.is_unlocked());
    assert!(session.entries(None).is_empty());
    assert_eq!(session.entry_count(), 0);

    // And the vault still opens afterwards.
    session.unlock(PASSWORD).unwrap();
    assert_eq!(session.entry_count(), 4);
}

#[test]
fn add_after_lock_fails_and_leaves_file_unchanged() {
    let (_dir, path) = vault_path();
    let mut session = populated_vault(&path);
    let before = fs::read(&path).unwrap();

    let result = session.add_entry(Entry::new("late", "user", "pw"));
    assert!(matches!(result, Err(SecureVaultError::VaultLocked)));
    assert_eq!(fs::read(&path).unwrap(), before);
}

// ---------------------------------------------------------------------------
// No overwrite on init
// ---------------------------------------------------------------------------

#[test]
fn second_init_reports_exists_and_keeps_bytes() {
    let (_dir, path) = vault_path();
    populated_vault(&path);
    let before = fs::read(&path).unwrap();

    let mut again = VaultSession::new(&path);
    let result = again.init("another-master-pw");
    assert!(matches!(result, Err(SecureVaultError::VaultAlreadyExists(_))));
    assert!(!again.is_unlocked());
    assert_eq!(fs::read(&path).unwrap(), before);

    // The original password still works.
    again.unlock(PASSWORD).unwrap();
    assert_eq!(again.entry_count(), 4);
}

// ---------------------------------------------------------------------------
// Failed writes
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
fn failed_save_rolls_back_in_memory_add() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let vault_dir = dir.path().join("locked-dir");
    let path = vault_dir.join("vault.enc");
    let mut session = VaultSession::new(&path);
    session.init(PASSWORD).unwrap();
    session
        .add_entry(Entry::new("kept", "u", "p"))
        .unwrap();

    // Read-only directory: the temp file cannot be created.
    fs::set_permissions(&vault_dir, fs::Permissions::from_mode(0o500)).unwrap();
    let result = session.add_entry(Entry::new("lost", "u", "p"));
    fs::set_permissions(&vault_dir, fs::Permissions::from_mode(0o700)).unwrap();

    // Root ignores directory permissions; nothing to check in that case.
    if result.is_ok() {
        return;
    }
    assert!(matches!(result, Err(SecureVaultError::Io(_))));
    assert_eq!(session.entry_count(), 1);
    assert!(session.find("lost").is_empty());

    let mut reader = VaultSession::new(&path);
    reader.unlock(PASSWORD).unwrap();
    assert_eq!(reader.entry_count(), 1);
}
