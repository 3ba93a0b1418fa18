//! Filesystem persistence for a vault directory.
//!
//! `VaultStore` knows where things live and how they are written, but
//! never sees a key or a plaintext: it moves opaque tokens between the
//! session and the disk.  See `format` for the directory layout.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{Result, SecurePassError};

use super::credential::SiteSlug;
use super::format::{self, MasterConfig, CONFIG_FILE, PROBE_FILE, RECORD_EXT};

/// Handle on one vault directory.
#[derive(Debug, Clone)]
pub struct VaultStore {
    /// Directory holding the config, probe, and record files.
    dir: PathBuf,
}

impl VaultStore {
    /// Point a store at `dir`.  Nothing is created until the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    // ------------------------------------------------------------------
    // Config
    // ------------------------------------------------------------------

    /// Load the vault config, or `None` if the vault is uninitialized.
    pub fn load_config(&self) -> Result<Option<MasterConfig>> {
        format::read_optional(&self.config_path())?
            .map(|bytes| MasterConfig::from_json(&bytes))
            .transpose()
    }

    /// Persist the vault config.
    ///
    /// Refuses to replace an existing config: overwriting the salt would
    /// make every stored record unreadable.  Use `reset` first.
    pub fn save_config(&self, config: &MasterConfig) -> Result<()> {
        if self.is_initialized() {
            return Err(SecurePassError::AlreadyInitialized(self.dir.clone()));
        }
        fs::create_dir_all(&self.dir)?;
        format::write_atomic(&self.config_path(), &config.to_json()?)?;
        debug!(dir = %self.dir.display(), "wrote vault config");
        Ok(())
    }

    /// Returns `true` if a config file exists.
    pub fn is_initialized(&self) -> bool {
        self.config_path().exists()
    }

    // ------------------------------------------------------------------
    // Verification probe
    // ------------------------------------------------------------------

    pub fn read_probe(&self) -> Result<Option<Vec<u8>>> {
        format::read_optional(&self.dir.join(PROBE_FILE))
    }

    pub fn write_probe(&self, token: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        format::write_atomic(&self.dir.join(PROBE_FILE), token)
    }

    // ------------------------------------------------------------------
    // Credential records
    // ------------------------------------------------------------------

    /// List the slugs of all stored records, sorted.
    ///
    /// The probe, the config, temp files, and anything that is not a
    /// well-formed `<slug>.enc` are skipped.
    pub fn list_sites(&self) -> Result<Vec<SiteSlug>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut sites = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(slug) = Self::slug_from_file_name(name) {
                sites.push(slug);
            }
        }

        sites.sort();
        Ok(sites)
    }

    /// Write (or overwrite) the record for `slug`.
    pub fn save_credential(&self, slug: &SiteSlug, token: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        format::write_atomic(&self.record_path(slug), token)
    }

    /// Read the record for `slug`.
    pub fn read_credential(&self, slug: &SiteSlug) -> Result<Vec<u8>> {
        format::read_optional(&self.record_path(slug))?
            .ok_or_else(|| SecurePassError::CredentialNotFound(slug.to_string()))
    }

    /// Delete the record for `slug`.
    pub fn delete_credential(&self, slug: &SiteSlug) -> Result<()> {
        if !format::remove_optional(&self.record_path(slug))? {
            return Err(SecurePassError::CredentialNotFound(slug.to_string()));
        }
        Ok(())
    }

    pub fn contains(&self, slug: &SiteSlug) -> bool {
        self.record_path(slug).exists()
    }

    // ------------------------------------------------------------------
    // Reset
    // ------------------------------------------------------------------

    /// Remove every record, the probe, and the config.
    ///
    /// Records go first, then the config, then the probe.  A config is
    /// never left behind without its probe, so an interrupted reset
    /// leaves either a locked vault or an uninitialized directory.
    /// Returns the number of records removed.  Unrelated files in the
    /// directory are kept.
    pub fn reset(&self) -> Result<usize> {
        let sites = self.list_sites()?;
        for slug in &sites {
            format::remove_optional(&self.record_path(slug))?;
        }
        format::remove_optional(&self.config_path())?;
        format::remove_optional(&self.dir.join(PROBE_FILE))?;
        Ok(sites.len())
    }

    // ------------------------------------------------------------------
    // Paths
    // ------------------------------------------------------------------

    /// Returns the vault directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    fn record_path(&self, slug: &SiteSlug) -> PathBuf {
        self.dir.join(slug.file_name())
    }

    fn slug_from_file_name(name: &str) -> Option<SiteSlug> {
        let stem = name.strip_suffix(RECORD_EXT)?.strip_suffix('.')?;
        SiteSlug::from_file_stem(stem)
    }
}
