//! `securepass list` — display all saved sites in a table.

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut session = ctx.unlock()?;

    let sites = session.list_sites()?;
    session.logout()?;

    output::info(&format!("{} saved site(s)", sites.len()));
    output::print_sites_table(&sites);

    Ok(())
}
