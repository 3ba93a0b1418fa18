//! `securepass delete` — remove the credentials for a site.

use crate::cli::output;
use crate::cli::{confirm, Cli, Context};
use crate::errors::Result;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, site: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force && !confirm(&format!("Delete saved credentials for '{site}'?"))? {
        output::info("Cancelled.");
        return Ok(());
    }

    let ctx = Context::load(cli)?;
    let mut session = ctx.unlock()?;

    let slug = session.delete_credential(site)?;
    session.logout()?;

    output::success(&format!("Deleted credentials for '{site}' ({slug}.enc)"));
    Ok(())
}
