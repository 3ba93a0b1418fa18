//! `securepass login` — check the master password against the vault.

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::Result;

/// Execute the `login` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut session = ctx.unlock()?;

    let count = session.list_sites()?.len();
    session.logout()?;

    output::success(&format!("Master password accepted ({count} saved site(s))"));
    Ok(())
}
