//! Vault lifecycle: bootstrap, login, credential access, logout.
//!
//! A `VaultSession` owns one `VaultStore` and, while unlocked, the
//! `DerivedKey`.  The key is never written anywhere; it lives inside
//! the `Unlocked` phase and is zeroed when the session leaves that
//! phase or is dropped.
//!
//! ```text
//!  Uninitialized ──start──▶ LockedAwaitingBootstrap ──bootstrap──▶ Unlocked
//!        │                                                        ▲   │
//!        └──────start──▶ LockedAwaitingLogin ───────login─────────┘   │
//!                                 ▲  ◀────────────logout──────────────┘
//! ```
//!
//! `reset` takes either locked-for-login or unlocked back to
//! `LockedAwaitingBootstrap`.

use std::fmt;

use chrono::Utc;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::crypto::kdf::{derive_with_params, KdfParams};
use crate::crypto::{decrypt_str, encrypt_str, DerivedKey};
use crate::errors::{Result, SecurePassError};
use crate::generator::{self, CharClasses};

use super::credential::{Credential, CredentialPayload, SiteSlug};
use super::format::{MasterConfig, PROBE_PLAINTEXT};
use super::store::VaultStore;

/// Observable state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, but the vault directory has not been inspected yet.
    Uninitialized,
    /// No config on disk; the next step is `bootstrap`.
    LockedAwaitingBootstrap,
    /// Config present; the next step is `login`.
    LockedAwaitingLogin,
    /// The derived key is held and credentials can be read and written.
    Unlocked,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Uninitialized => "uninitialized",
            Self::LockedAwaitingBootstrap => "awaiting bootstrap",
            Self::LockedAwaitingLogin => "locked",
            Self::Unlocked => "unlocked",
        };
        f.write_str(label)
    }
}

/// Internal phase, carrying the data each state needs.
enum Phase {
    Uninitialized,
    AwaitingBootstrap,
    AwaitingLogin { config: MasterConfig },
    Unlocked { config: MasterConfig, key: DerivedKey },
}

/// One logical session against a vault directory.
pub struct VaultSession {
    store: VaultStore,
    phase: Phase,
    /// Parameters for a vault created by `bootstrap`.  Existing vaults
    /// always use the parameters stored in their config.
    bootstrap_params: KdfParams,
}

impl fmt::Debug for VaultSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultSession")
            .field("dir", &self.store.dir())
            .field("state", &self.state())
            .finish()
    }
}

impl VaultSession {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a session in the `Uninitialized` state.
    pub fn new(store: VaultStore) -> Self {
        Self {
            store,
            phase: Phase::Uninitialized,
            bootstrap_params: KdfParams::default(),
        }
    }

    /// Use `params` if this session bootstraps a new vault.
    pub fn with_kdf_params(mut self, params: KdfParams) -> Self {
        self.bootstrap_params = params;
        self
    }

    /// Create a session and immediately run `start`.
    pub fn open(store: VaultStore) -> Result<Self> {
        let mut session = Self::new(store);
        session.start()?;
        Ok(session)
    }

    /// Inspect the vault directory and pick the starting state.
    pub fn start(&mut self) -> Result<SessionState> {
        self.require(SessionState::Uninitialized, "start the session")?;

        self.phase = match self.store.load_config()? {
            Some(config) => Phase::AwaitingLogin { config },
            None => Phase::AwaitingBootstrap,
        };
        debug!(state = %self.state(), "session started");
        Ok(self.state())
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Create a new vault protected by `password` and unlock it.
    pub fn bootstrap(&mut self, password: &str, confirm_password: &str) -> Result<()> {
        match self.state() {
            SessionState::LockedAwaitingBootstrap => {}
            SessionState::LockedAwaitingLogin | SessionState::Unlocked => {
                return Err(SecurePassError::AlreadyInitialized(
                    self.store.dir().to_path_buf(),
                ));
            }
            state => {
                return Err(SecurePassError::InvalidState {
                    operation: "bootstrap",
                    state,
                })
            }
        }

        if password.is_empty() {
            return Err(SecurePassError::Validation(
                "master password cannot be empty".into(),
            ));
        }
        if password != confirm_password {
            return Err(SecurePassError::Validation(
                "passwords do not match".into(),
            ));
        }
        self.bootstrap_params.validate()?;

        let (key, salt) = derive_with_params(password, None, &self.bootstrap_params);
        let config = MasterConfig::new(salt, &self.bootstrap_params);
        let probe = encrypt_str(&key, PROBE_PLAINTEXT)?;

        // The config is the commit point: without it the directory still
        // reads as uninitialized, and a leftover probe is overwritten on retry.
        self.store.write_probe(&probe)?;
        self.store.save_config(&config)?;

        info!(
            dir = %self.store.dir().display(),
            iterations = config.iterations,
            "vault initialized"
        );
        self.phase = Phase::Unlocked { config, key };
        Ok(())
    }

    /// Unlock an existing vault.
    ///
    /// The candidate key is checked by decrypting the verification probe.
    /// A vault with no probe (older layout) accepts the key and gets its
    /// probe written now; this is a one-time migration, not a check.
    pub fn login(&mut self, password: &str) -> Result<()> {
        let config = match &self.phase {
            Phase::AwaitingLogin { config } => config.clone(),
            _ => {
                return Err(SecurePassError::InvalidState {
                    operation: "log in",
                    state: self.state(),
                })
            }
        };

        let (key, _) = derive_with_params(password, Some(config.salt()?), &config.kdf_params());

        match self.store.read_probe()? {
            Some(probe) => match decrypt_str(&key, &probe) {
                Ok(plaintext) if plaintext == PROBE_PLAINTEXT => {}
                _ => {
                    info!("login rejected: verification probe did not decrypt");
                    return Err(SecurePassError::Authentication);
                }
            },
            None => {
                warn!("vault has no verification probe; creating one from this login");
                self.store.write_probe(&encrypt_str(&key, PROBE_PLAINTEXT)?)?;
            }
        }

        info!("vault unlocked");
        self.phase = Phase::Unlocked { config, key };
        Ok(())
    }

    /// Drop the key and return to `LockedAwaitingLogin`.
    pub fn logout(&mut self) -> Result<()> {
        let phase = std::mem::replace(&mut self.phase, Phase::Uninitialized);
        match phase {
            Phase::Unlocked { config, key } => {
                drop(key);
                self.phase = Phase::AwaitingLogin { config };
                info!("vault locked");
                Ok(())
            }
            other => {
                self.phase = other;
                Err(SecurePassError::InvalidState {
                    operation: "log out",
                    state: self.state(),
                })
            }
        }
    }

    /// Delete the whole vault (config, probe, and every record) and go
    /// back to `LockedAwaitingBootstrap`.  Works without the master
    /// password; records under a forgotten password are lost either way.
    ///
    /// If the store fails part-way, the session follows the disk: it stays
    /// locked for login while the config survives, and awaits bootstrap
    /// once the config is gone.
    pub fn reset(&mut self) -> Result<usize> {
        let config = match std::mem::replace(&mut self.phase, Phase::Uninitialized) {
            Phase::AwaitingLogin { config } | Phase::Unlocked { config, .. } => config,
            other => {
                self.phase = other;
                return Err(SecurePassError::InvalidState {
                    operation: "reset the vault",
                    state: self.state(),
                });
            }
        };

        // The key is already dropped; only the config is carried over.
        self.phase = Phase::AwaitingLogin { config };
        let result = self.store.reset();
        if !self.store.is_initialized() {
            self.phase = Phase::AwaitingBootstrap;
        }
        let removed = result?;

        warn!(records = removed, "vault reset");
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Credential operations
    // ------------------------------------------------------------------

    /// Encrypt and store credentials for `site`, replacing any earlier
    /// record with the same slug.  Returns the slug used.
    pub fn save_credential(
        &mut self,
        site: &str,
        username: &str,
        password: &str,
    ) -> Result<SiteSlug> {
        let key = self.key("save credentials")?;

        if site.trim().is_empty() || username.is_empty() || password.is_empty() {
            return Err(SecurePassError::Validation(
                "site, username, and password are all required".into(),
            ));
        }
        let slug = SiteSlug::parse(site)?;

        let payload = CredentialPayload {
            site: Some(site.trim().to_string()),
            username: username.to_string(),
            password: password.to_string(),
            saved_at: Some(Utc::now()),
        };
        let json = Zeroizing::new(
            serde_json::to_string(&payload)
                .map_err(|e| SecurePassError::Serialization(format!("credential: {e}")))?,
        );
        let token = encrypt_str(key, &json)?;

        self.store.save_credential(&slug, &token)?;
        info!(site = %slug, "credential saved");
        Ok(slug)
    }

    /// Decrypt the credentials stored for `site`.
    ///
    /// A record that does not decrypt under the session key is an
    /// `Integrity` error, never an authentication failure; the record
    /// stays on disk untouched.
    pub fn read_credential(&self, site: &str) -> Result<Credential> {
        let key = self.key("read credentials")?;
        let slug = SiteSlug::parse(site)?;

        let token = self.store.read_credential(&slug)?;
        let integrity = || SecurePassError::Integrity {
            site: slug.to_string(),
        };

        let json = Zeroizing::new(decrypt_str(key, &token).map_err(|_| integrity())?);
        let payload: CredentialPayload = serde_json::from_str(&json).map_err(|_| integrity())?;

        debug!(site = %slug, "credential read");
        Ok(payload.into_credential(slug))
    }

    /// Remove the record for `site`.
    pub fn delete_credential(&mut self, site: &str) -> Result<SiteSlug> {
        self.key("delete credentials")?;
        let slug = SiteSlug::parse(site)?;

        self.store.delete_credential(&slug)?;
        info!(site = %slug, "credential deleted");
        Ok(slug)
    }

    /// Returns `true` if a record exists for `site`.  No decryption.
    pub fn has_credential(&self, site: &str) -> Result<bool> {
        self.key("look up credentials")?;
        Ok(self.store.contains(&SiteSlug::parse(site)?))
    }

    /// List the slugs of every stored record.
    pub fn list_sites(&self) -> Result<Vec<SiteSlug>> {
        self.key("list sites")?;
        self.store.list_sites()
    }

    /// Generate a random password.  Usable in any state.
    pub fn generate_password(&self, length: usize, classes: CharClasses) -> Result<String> {
        generator::generate(length, classes)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::Uninitialized => SessionState::Uninitialized,
            Phase::AwaitingBootstrap => SessionState::LockedAwaitingBootstrap,
            Phase::AwaitingLogin { .. } => SessionState::LockedAwaitingLogin,
            Phase::Unlocked { .. } => SessionState::Unlocked,
        }
    }

    /// The config of an opened vault.
    pub fn config(&self) -> Option<&MasterConfig> {
        match &self.phase {
            Phase::AwaitingLogin { config } | Phase::Unlocked { config, .. } => Some(config),
            _ => None,
        }
    }

    pub fn store(&self) -> &VaultStore {
        &self.store
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn key(&self, operation: &'static str) -> Result<&DerivedKey> {
        match &self.phase {
            Phase::Unlocked { key, .. } => Ok(key),
            _ => Err(SecurePassError::InvalidState {
                operation,
                state: self.state(),
            }),
        }
    }

    fn require(&self, expected: SessionState, operation: &'static str) -> Result<()> {
        let state = self.state();
        if state != expected {
            return Err(SecurePassError::InvalidState { operation, state });
        }
        Ok(())
    }
}
