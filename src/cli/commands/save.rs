//! `securepass save` — store credentials for a site.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{Result, SecurePassError};
use crate::generator::{self, CharClasses};

/// Execute the `save` command.
pub fn execute(
    cli: &Cli,
    site: &str,
    username: Option<&str>,
    password: Option<&str>,
    generate: bool,
    length: Option<usize>,
) -> Result<()> {
    let ctx = Context::load(cli)?;

    // Gather input before unlocking so a bad --length fails fast.
    let username = match username {
        Some(u) => u.to_string(),
        None => dialoguer::Input::<String>::new()
            .with_prompt(format!("Username or email for {site}"))
            .interact_text()
            .map_err(|e| SecurePassError::CommandFailed(format!("input prompt: {e}")))?,
    };

    let secret = if generate {
        let length = length.unwrap_or(ctx.settings.password_length);
        Zeroizing::new(generator::generate(length, CharClasses::all())?)
    } else {
        read_password(site, password)?
    };

    let mut session = ctx.unlock()?;
    let existed = session.has_credential(site)?;
    let slug = session.save_credential(site, &username, &secret)?;
    session.logout()?;

    if existed {
        output::success(&format!("Credentials for {site} updated ({slug}.enc)"));
    } else {
        output::success(&format!("Credentials for {site} saved ({slug}.enc)"));
    }
    if generate {
        output::info(&format!("Generated password: {}", secret.as_str()));
    }

    Ok(())
}

/// Determine the site password from one of three sources.
fn read_password(site: &str, password: Option<&str>) -> Result<Zeroizing<String>> {
    if let Some(pw) = password {
        // Source 1: Inline value on the command line.
        output::warning("Password provided on command line — it may appear in shell history.");
        return Ok(Zeroizing::new(pw.to_string()));
    }

    if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        return Ok(Zeroizing::new(buf.trim_end().to_string()));
    }

    // Source 3: Interactive secure prompt (default).
    dialoguer::Password::new()
        .with_prompt(format!("Password for {site}"))
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| SecurePassError::CommandFailed(format!("password prompt: {e}")))
}
