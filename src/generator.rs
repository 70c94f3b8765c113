//! Random password generation.
//!
//! Two flavors: character passwords drawn from a configurable alphabet,
//! and memorable passwords made of dictionary words.  Both draw from the
//! thread-local CSPRNG.

use rand::seq::IndexedRandom;
use zeroize::Zeroizing;

use crate::errors::{Result, SecureVaultError};

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Shortest password `generate_password` will produce.
pub const MIN_GENERATED_LEN: usize = 4;

const WORDS: [&str; 24] = [
    "apple", "brave", "cloud", "dance", "eagle", "flame", "green", "happy", "island", "jungle",
    "knight", "lemon", "magic", "noble", "ocean", "peace", "quest", "river", "storm", "tiger",
    "unity", "violet", "winter", "zebra",
];

/// Which character classes go into a generated password.
///
/// Lowercase letters are always included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordOptions {
    pub length: usize,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            digits: true,
            symbols: true,
        }
    }
}

impl PasswordOptions {
    fn alphabet(&self) -> Vec<char> {
        let mut chars: Vec<char> = LOWERCASE.chars().collect();
        if self.uppercase {
            chars.extend(UPPERCASE.chars());
        }
        if self.digits {
            chars.extend(DIGITS.chars());
        }
        if self.symbols {
            chars.extend(SYMBOLS.chars());
        }
        chars
    }
}

/// Generate a random password of `options.length` characters.
pub fn generate_password(options: &PasswordOptions) -> Result<Zeroizing<String>> {
    if options.length < MIN_GENERATED_LEN {
        return Err(SecureVaultError::Validation(format!(
            "password length must be at least {MIN_GENERATED_LEN} characters"
        )));
    }

    let alphabet = options.alphabet();
    let mut rng = rand::rng();
    let mut password = Zeroizing::new(String::with_capacity(options.length));
    for _ in 0..options.length {
        // The alphabet always holds at least the lowercase letters.
        if let Some(c) = alphabet.choose(&mut rng) {
            password.push(*c);
        }
    }
    Ok(password)
}

/// Generate a password of distinct random words joined by `separator`.
///
/// Asks for more words than the list holds get the whole list, shuffled.
pub fn generate_memorable(word_count: usize, separator: &str) -> String {
    let count = word_count.min(WORDS.len());
    let mut rng = rand::rng();
    WORDS
        .choose_multiple(&mut rng, count)
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
}
