//! One module per subcommand.  Each exposes an `execute` function.

pub mod completions;
pub mod delete;
pub mod generate;
pub mod init;
pub mod list;
pub mod login;
pub mod reset;
pub mod save;
pub mod show;
