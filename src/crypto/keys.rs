//! Key material types.
//!
//! A vault has exactly one salt (public, stored in the clear at the front
//! of the vault file) and one derived key (secret, never persisted).

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of the per-vault salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Random per-vault salt mixed into key derivation.
pub type Salt = [u8; SALT_LEN];

/// A 32-byte symmetric key derived from the master password.
///
/// The bytes are wiped when the key is dropped, so locking a session
/// (which drops its key) leaves nothing behind in memory.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build a cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

// Never print key material, even in debug output.
impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}
