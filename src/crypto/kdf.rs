//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The master password and the vault salt go in; a 32-byte `DerivedKey`
//! comes out.  The iteration count is stored in the vault config so a
//! vault is always reopened with the count it was created with.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use tracing::debug;

use super::keys::{DerivedKey, Salt, KEY_LEN};
use crate::errors::{Result, SecurePassError};

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Lowest iteration count accepted when creating a vault.
pub const MIN_ITERATIONS: u32 = 1_000;

/// PBKDF2 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl KdfParams {
    /// Reject dangerously weak settings before a vault is created with them.
    pub fn validate(&self) -> Result<()> {
        if self.iterations < MIN_ITERATIONS {
            return Err(SecurePassError::Config(format!(
                "kdf_iterations must be at least {MIN_ITERATIONS} (got {})",
                self.iterations
            )));
        }
        Ok(())
    }
}

/// Derive a key from `password`, generating a fresh salt when none is given.
///
/// Uses the default iteration count.  Returns the key together with the
/// salt that produced it so a new vault can persist the salt.
pub fn derive(password: &str, salt: Option<Salt>) -> (DerivedKey, Salt) {
    derive_with_params(password, salt, &KdfParams::default())
}

/// Derive a key with an explicit iteration count.
///
/// The same password + salt + params always produce the same key.
pub fn derive_with_params(
    password: &str,
    salt: Option<Salt>,
    params: &KdfParams,
) -> (DerivedKey, Salt) {
    let salt = salt.unwrap_or_else(Salt::generate);
    debug!(iterations = params.iterations, "deriving key");

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        salt.as_bytes(),
        params.iterations,
        &mut key,
    );

    (DerivedKey::new(key), salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: KdfParams = KdfParams {
        iterations: MIN_ITERATIONS,
    };

    #[test]
    fn missing_salt_is_generated() {
        let (_, salt1) = derive_with_params("pw", None, &FAST);
        let (_, salt2) = derive_with_params("pw", None, &FAST);
        assert_ne!(salt1, salt2);
    }

    #[test]
    fn given_salt_is_returned_unchanged() {
        let salt = Salt::from([7u8; 16]);
        let (_, returned) = derive_with_params("pw", Some(salt), &FAST);
        assert_eq!(returned, salt);
    }

    #[test]
    fn iteration_count_changes_the_key() {
        let salt = Salt::from([3u8; 16]);
        let (k1, _) = derive_with_params("pw", Some(salt), &FAST);
        let (k2, _) = derive_with_params(
            "pw",
            Some(salt),
            &KdfParams {
                iterations: MIN_ITERATIONS + 1,
            },
        );
        assert_ne!(k1, k2);
    }

    #[test]
    fn derive_matches_pbkdf2_sha256_at_minimum_iterations() {
        // P="passwd", S=16 bytes of 0x73 ('s'), c=1000, dkLen=32.
        let (key, _) = derive_with_params("passwd", Some(Salt::from([0x73; 16])), &FAST);
        assert_eq!(
            key.as_bytes(),
            &[
                0x5a, 0x03, 0xd1, 0x01, 0x09, 0x53, 0x4b, 0x15, 0xb1, 0xe0, 0xc3, 0xe3, 0x8c, 0x7d,
                0x43, 0x88, 0xf5, 0x82, 0x2c, 0xf7, 0x96, 0xb1, 0x3d, 0x47, 0x5b, 0x88, 0x33, 0x4b,
                0xed, 0xbe, 0x81, 0xf5,
            ]
        );
    }

    #[test]
    fn validate_enforces_minimum() {
        assert!(KdfParams::default().validate().is_ok());
        assert!(FAST.validate().is_ok());
        assert!(KdfParams { iterations: 999 }.validate().is_err());
    }
}
