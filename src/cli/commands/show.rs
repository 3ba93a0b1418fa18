//! `securepass show` — decrypt and print the credentials for one site.

use crate::cli::{clipboard, output};
use crate::cli::{Cli, Context};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli, site: &str, copy: bool) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut session = ctx.unlock()?;

    let credential = session.read_credential(site)?;
    session.logout()?;

    output::print_credential(&credential, !copy);
    if copy {
        clipboard::copy(&credential.password)?;
        output::success("Password copied to clipboard");
    }

    Ok(())
}
