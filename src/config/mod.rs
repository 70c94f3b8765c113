//! User configuration.

pub mod settings;

pub use settings::{default_data_dir, Settings};
