use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{KdfParams, DEFAULT_ITERATIONS};
use crate::errors::{Result, SecurePassError};
use crate::generator::DEFAULT_LENGTH;

/// Project-level configuration, loaded from `.securepass.toml`.
///
/// Every field has a sensible default so SecurePass works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) holding the vault.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// PBKDF2 iteration count for newly created vaults (default: 100 000).
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Default length for generated passwords (default: 16).
    #[serde(default = "default_password_length")]
    pub password_length: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".securepass".to_string()
}

fn default_kdf_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

fn default_password_length() -> usize {
    DEFAULT_LENGTH
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            kdf_iterations: default_kdf_iterations(),
            password_length: default_password_length(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    pub const FILE_NAME: &'static str = ".securepass.toml";

    /// Load settings from `<dir>/.securepass.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            SecurePassError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Resolve the vault directory against `base_dir`.
    ///
    /// `override_dir` (from `--vault-dir`) takes precedence over the
    /// configured `vault_dir`.  Absolute paths are used as-is.
    pub fn vault_path(&self, base_dir: &Path, override_dir: Option<&str>) -> PathBuf {
        base_dir.join(override_dir.unwrap_or(&self.vault_dir))
    }

    /// Convert the KDF settings into crypto-layer params.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            iterations: self.kdf_iterations,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.vault_dir, ".securepass");
        assert_eq!(s.kdf_iterations, 100_000);
        assert_eq!(s.password_length, 16);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_dir, ".securepass");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_dir = "data"
kdf_iterations = 200000
password_length = 24
"#;
        fs::write(tmp.path().join(".securepass.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_dir, "data");
        assert_eq!(settings.kdf_iterations, 200_000);
        assert_eq!(settings.password_length, 24);
        assert_eq!(settings.kdf_params().iterations, 200_000);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".securepass.toml"), "vault_dir = \"data\"\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_dir, "data");
        // Rest should be defaults
        assert_eq!(settings.kdf_iterations, 100_000);
        assert_eq!(settings.password_length, 16);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".securepass.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(SecurePassError::Config(_))));
    }

    #[test]
    fn vault_path_uses_configured_dir() {
        let s = Settings::default();
        let base = Path::new("/home/user");
        assert_eq!(
            s.vault_path(base, None),
            PathBuf::from("/home/user/.securepass")
        );
    }

    #[test]
    fn vault_path_prefers_override() {
        let s = Settings {
            vault_dir: "data".to_string(),
            ..Settings::default()
        };
        let base = Path::new("/home/user");
        assert_eq!(
            s.vault_path(base, Some("other")),
            PathBuf::from("/home/user/other")
        );
        assert_eq!(
            s.vault_path(base, Some("/srv/vault")),
            PathBuf::from("/srv/vault")
        );
    }
}
