//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod clipboard;
pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, SecurePassError};
use crate::vault::{SessionState, VaultSession, VaultStore};

/// Environment variable checked for the master password before prompting.
pub const PASSWORD_ENV: &str = "SECUREPASS_PASSWORD";

/// SecurePass CLI: local encrypted password vault.
#[derive(Parser)]
#[command(
    name = "securepass",
    about = "Local encrypted password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: .securepass, or `vault_dir` in .securepass.toml)
    #[arg(long, global = true)]
    pub vault_dir: Option<String>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault protected by a master password
    Init,

    /// Check the master password against the vault
    Login,

    /// Save credentials for a site (overwrites existing ones)
    Save {
        /// Site or application name (e.g. GitHub)
        site: String,
        /// Username or email (omit for interactive prompt)
        #[arg(short, long)]
        username: Option<String>,
        /// Password (omit for piped stdin or interactive prompt)
        #[arg(short, long, conflicts_with = "generate")]
        password: Option<String>,
        /// Generate a random password instead of entering one
        #[arg(short, long)]
        generate: bool,
        /// Length of the generated password (8-32)
        #[arg(short, long, requires = "generate")]
        length: Option<usize>,
    },

    /// Show the saved credentials for a site
    Show {
        /// Site or application name
        site: String,
        /// Copy the password to the clipboard instead of printing it
        #[arg(short, long)]
        copy: bool,
    },

    /// List all saved sites
    List,

    /// Delete the saved credentials for a site
    Delete {
        /// Site or application name
        site: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a random password
    Generate {
        /// Password length (8-32, default: 16)
        #[arg(short, long)]
        length: Option<usize>,
        /// Leave out uppercase letters
        #[arg(long)]
        no_upper: bool,
        /// Leave out lowercase letters
        #[arg(long)]
        no_lower: bool,
        /// Leave out digits
        #[arg(long)]
        no_digits: bool,
        /// Leave out symbols
        #[arg(long)]
        no_symbols: bool,
        /// Copy the password to the clipboard instead of printing it
        #[arg(short, long)]
        copy: bool,
    },

    /// Delete the vault and every saved credential
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Settings and vault location resolved for one invocation.
pub struct Context {
    pub settings: Settings,
    pub vault_dir: PathBuf,
}

impl Context {
    /// Load `.securepass.toml` from the working directory and resolve
    /// the vault directory (`--vault-dir` wins over the config file).
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let settings = Settings::load(&cwd)?;
        let vault_dir = settings.vault_path(&cwd, cli.vault_dir.as_deref());
        Ok(Self {
            settings,
            vault_dir,
        })
    }

    /// Start a session on the vault directory.
    pub fn open_session(&self) -> Result<VaultSession> {
        let mut session = VaultSession::new(VaultStore::new(&self.vault_dir))
            .with_kdf_params(self.settings.kdf_params());
        session.start()?;
        Ok(session)
    }

    /// Start a session and log in with the master password.
    pub fn unlock(&self) -> Result<VaultSession> {
        let mut session = self.open_session()?;
        if session.state() == SessionState::LockedAwaitingBootstrap {
            return Err(SecurePassError::NotInitialized(self.vault_dir.clone()));
        }

        let password = prompt_password()?;
        session.login(&password)?;
        Ok(session)
    }
}

/// Get the master password, trying in order:
/// 1. `SECUREPASS_PASSWORD` env var (scripts, CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| SecurePassError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password and its confirmation (used by `init`).
///
/// Both values are returned as typed; comparing them is the session's job.
/// With `SECUREPASS_PASSWORD` set, that value is used for both.
pub fn prompt_new_password() -> Result<(Zeroizing<String>, Zeroizing<String>)> {
    if let Some(pw) = password_from_env() {
        let confirm = pw.clone();
        return Ok((pw, confirm));
    }

    let prompt = |label: &str| {
        dialoguer::Password::new()
            .with_prompt(label)
            .allow_empty_password(true)
            .interact()
            .map(Zeroizing::new)
            .map_err(|e| SecurePassError::CommandFailed(format!("password prompt: {e}")))
    };

    let password = prompt("Create master password")?;
    let confirm = prompt("Confirm master password")?;
    Ok((password, confirm))
}

fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Ask a yes/no question, defaulting to "no".
pub fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| SecurePassError::CommandFailed(format!("confirm prompt: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn save_rejects_password_with_generate() {
        let result = Cli::try_parse_from([
            "securepass", "save", "GitHub", "-u", "alice", "-p", "pw", "--generate",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn save_length_requires_generate() {
        let result = Cli::try_parse_from(["securepass", "save", "GitHub", "--length", "20"]);
        assert!(result.is_err());

        let result =
            Cli::try_parse_from(["securepass", "save", "GitHub", "--generate", "--length", "20"]);
        assert!(result.is_ok());
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["securepass", "list", "--vault-dir", "data", "-vv"]).unwrap();
        assert_eq!(cli.vault_dir.as_deref(), Some("data"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn completions_rejects_unknown_shell() {
        assert!(Cli::try_parse_from(["securepass", "completions", "csh"]).is_err());
        assert!(Cli::try_parse_from(["securepass", "completions", "fish"]).is_ok());
    }
}
