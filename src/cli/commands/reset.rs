//! `securepass reset` — delete the vault so it can be set up again.

use crate::cli::output;
use crate::cli::{confirm, Cli, Context};
use crate::errors::{Result, SecurePassError};
use crate::vault::SessionState;

/// Execute the `reset` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut session = ctx.open_session()?;

    if session.state() == SessionState::LockedAwaitingBootstrap {
        return Err(SecurePassError::NotInitialized(ctx.vault_dir));
    }

    if !force {
        output::warning("This permanently deletes the master password setup and every saved password.");
        if !confirm(&format!("Reset the vault at {}?", ctx.vault_dir.display()))? {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let removed = session.reset()?;
    output::success(&format!("Vault reset ({removed} saved site(s) removed)"));
    output::tip("Run `securepass init` to set a new master password.");

    Ok(())
}
