//! One module per subcommand, each exposing an `execute` function.

pub mod add;
pub mod completions;
pub mod generate;
pub mod get;
pub mod init;
pub mod list;
pub mod memorable;
pub mod search;
