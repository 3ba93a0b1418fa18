//! `securepass init` — create a new vault protected by a master password.

use crate::cli::output;
use crate::cli::{prompt_new_password, Cli, Context};
use crate::errors::{Result, SecurePassError};
use crate::vault::SessionState;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut session = ctx.open_session()?;

    // Refuse before prompting so the user does not type a password for nothing.
    if session.state() != SessionState::LockedAwaitingBootstrap {
        output::tip("Run `securepass reset` first to start over with a new master password.");
        return Err(SecurePassError::AlreadyInitialized(ctx.vault_dir));
    }

    let (password, confirm) = prompt_new_password()?;
    session.bootstrap(&password, &confirm)?;

    output::success(&format!("Vault created at {}", ctx.vault_dir.display()));
    output::tip("Run `securepass save <SITE>` to store your first password.");
    output::tip("Run `securepass generate` to create a strong password.");

    Ok(())
}
