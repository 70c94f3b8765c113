//! Password-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that protects against brute-force and
//! GPU-based attacks.  The parameters are fixed constants: a vault file
//! written on one machine must open on any other, so nothing about the
//! derivation is read from configuration.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use zeroize::Zeroize;

use super::keys::{DerivedKey, Salt, KEY_LEN, SALT_LEN};
use crate::errors::{Result, SecureVaultError};

/// Argon2id memory cost in KiB (64 MB).
pub const KDF_MEMORY_KIB: u32 = 65_536;

/// Argon2id iteration count.
pub const KDF_ITERATIONS: u32 = 3;

/// Argon2id parallelism lanes.
pub const KDF_PARALLELISM: u32 = 4;

/// Derive the 32-byte vault key from a master password and salt.
///
/// The same password + salt always produce the same key.  Every call
/// performs the full Argon2id computation regardless of the password
/// contents.
pub fn derive_key(password: &[u8], salt: &Salt) -> Result<DerivedKey> {
    let params = Params::new(
        KDF_MEMORY_KIB,
        KDF_ITERATIONS,
        KDF_PARALLELISM,
        Some(KEY_LEN),
    )
    .map_err(|e| SecureVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(password, salt, &mut key)
        .map_err(|e| SecureVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    let derived = DerivedKey::new(key);
    key.zeroize();
    Ok(derived)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> Salt {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
