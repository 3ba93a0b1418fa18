//! `securepass generate` — print (or copy) a random password.
//!
//! Needs no vault and no master password.

use crate::cli::{clipboard, output};
use crate::cli::{Cli, Context};
use crate::errors::Result;
use crate::generator::{self, CharClasses};

/// Execute the `generate` command.
pub fn execute(cli: &Cli, length: Option<usize>, classes: CharClasses, copy: bool) -> Result<()> {
    let ctx = Context::load(cli)?;
    let length = length.unwrap_or(ctx.settings.password_length);

    let password = generator::generate(length, classes)?;

    if copy {
        clipboard::copy(&password)?;
        output::success(&format!(
            "Generated a {length}-character password and copied it to the clipboard"
        ));
    } else {
        // Bare line on stdout so it can be piped, e.g. into `save`.
        println!("{password}");
    }

    Ok(())
}
