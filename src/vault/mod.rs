//! Vault module: encrypted credential storage.
//!
//! This module provides:
//! - The `Entry` credential type (`entry`)
//! - The in-memory `EntryStore` (`store`)
//! - The binary vault file format (`format`)
//! - `VaultSession`, the lock/unlock state machine (`session`)

pub mod entry;
pub mod format;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use entry::Entry;
pub use format::VaultFile;
pub use session::{VaultSession, MIN_PASSWORD_LEN};
pub use store::EntryStore;
