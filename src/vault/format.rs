//! On-disk layout of a vault directory.
//!
//! ```text
//! <vault_dir>/
//!   config.json     MasterConfig (salt + KDF iterations), plain JSON
//!   .probe.enc      token of the literal plaintext "test"
//!   <slug>.enc      token of one serialized credential payload
//! ```
//!
//! Every write goes through `write_atomic`: temp file in the same
//! directory, owner-only permissions, then rename over the target.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{KdfParams, DEFAULT_ITERATIONS};
use crate::crypto::Salt;
use crate::errors::{Result, SecurePassError};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// File holding the `MasterConfig`.
pub const CONFIG_FILE: &str = "config.json";

/// File holding the verification probe.
pub const PROBE_FILE: &str = ".probe.enc";

/// Extension of every encrypted record file.
pub const RECORD_EXT: &str = "enc";

/// Known plaintext encrypted into the verification probe.
pub const PROBE_PLAINTEXT: &str = "test";

/// Current config format version.
pub const CURRENT_VERSION: u8 = 1;

// ---------------------------------------------------------------------------
// MasterConfig
// ---------------------------------------------------------------------------

/// Per-vault configuration, written once at bootstrap.
///
/// Holds nothing secret: the salt and iteration count are useless
/// without the master password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterConfig {
    /// Format version.
    pub version: u8,

    /// The 16-byte PBKDF2 salt (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// PBKDF2 iteration count used at bootstrap.
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// When this vault was created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

impl MasterConfig {
    pub fn new(salt: Salt, params: &KdfParams) -> Self {
        Self {
            version: CURRENT_VERSION,
            salt: salt.as_bytes().to_vec(),
            iterations: params.iterations,
            created_at: Utc::now(),
        }
    }

    /// The stored salt, checked to be exactly 16 bytes.
    pub fn salt(&self) -> Result<Salt> {
        Salt::from_slice(&self.salt)
    }

    /// KDF parameters to reopen this vault with.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            iterations: self.iterations,
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| SecurePassError::Serialization(format!("config: {e}")))
    }

    /// Parse and validate a config read from disk.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let config: MasterConfig = serde_json::from_slice(bytes)
            .map_err(|e| SecurePassError::InvalidVaultFormat(format!("config JSON: {e}")))?;

        if config.version != CURRENT_VERSION {
            return Err(SecurePassError::InvalidVaultFormat(format!(
                "unsupported config version {}, expected {CURRENT_VERSION}",
                config.version
            )));
        }
        if config.iterations == 0 {
            return Err(SecurePassError::InvalidVaultFormat(
                "iteration count cannot be zero".into(),
            ));
        }
        config.salt()?;

        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

/// Write `data` to `path` atomically with owner-only permissions.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, data)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(())
}

/// Read a file, mapping "not found" to `None`.
pub fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Remove a file, returning whether it existed.
pub fn remove_optional(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_json_roundtrip() {
        let salt = Salt::from([9u8; 16]);
        let config = MasterConfig::new(salt, &KdfParams { iterations: 5_000 });
        let parsed = MasterConfig::from_json(&config.to_json().unwrap()).unwrap();

        assert_eq!(parsed.salt().unwrap(), salt);
        assert_eq!(parsed.iterations, 5_000);
        assert_eq!(parsed.created_at, config.created_at);
    }

    #[test]
    fn missing_iterations_defaults_to_100k() {
        let json = br#"{"version":1,"salt":"AAAAAAAAAAAAAAAAAAAAAA=="}"#;
        let config = MasterConfig::from_json(json).unwrap();
        assert_eq!(config.iterations, 100_000);
    }

    #[test]
    fn short_salt_is_rejected() {
        let json = br#"{"version":1,"salt":"AAAA","iterations":1000}"#;
        assert!(matches!(
            MasterConfig::from_json(json),
            Err(SecurePassError::InvalidVaultFormat(_))
        ));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let json = br#"{"version":9,"salt":"AAAAAAAAAAAAAAAAAAAAAA==","iterations":1000}"#;
        assert!(MasterConfig::from_json(json).is_err());
    }

    #[test]
    fn write_atomic_replaces_whole_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("record.enc");

        write_atomic(&path, b"first version, quite long").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        // No temp file is left behind.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn write_atomic_sets_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        write_atomic(&path, b"{}").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn read_and_remove_optional_handle_missing_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.enc");

        assert!(read_optional(&path).unwrap().is_none());
        assert!(!remove_optional(&path).unwrap());

        fs::write(&path, b"x").unwrap();
        assert_eq!(read_optional(&path).unwrap().as_deref(), Some(&b"x"[..]));
        assert!(remove_optional(&path).unwrap());
    }
}
