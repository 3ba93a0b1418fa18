//! AES-256-GCM authenticated encryption of vault records.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce.  The
//! result is a printable token, so record files stay plain ASCII:
//!
//! ```text
//! URL_SAFE_BASE64( [ version: 1 byte | nonce: 12 bytes | ciphertext + 16-byte tag ] )
//! ```
//!
//! `decrypt` reports every failure (wrong key, bad encoding, truncated
//! data, tag mismatch) as `DecryptionFailed` and never panics.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;

use super::keys::DerivedKey;
use crate::errors::{Result, SecurePassError};

/// Token format version.
const TOKEN_VERSION: u8 = 1;

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key` and return the token bytes.
pub fn encrypt(key: &DerivedKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| SecurePassError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| SecurePassError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut raw = Vec::with_capacity(1 + NONCE_LEN + ciphertext.len());
    raw.push(TOKEN_VERSION);
    raw.extend_from_slice(&nonce);
    raw.extend_from_slice(&ciphertext);

    Ok(URL_SAFE.encode(raw).into_bytes())
}

/// Decrypt a token produced by `encrypt`.
pub fn decrypt(key: &DerivedKey, token: &[u8]) -> Result<Vec<u8>> {
    // Tolerate a trailing newline from hand-edited files.
    let end = token
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    let token = &token[..end];

    let raw = URL_SAFE
        .decode(token)
        .map_err(|_| SecurePassError::DecryptionFailed)?;

    if raw.len() < 1 + NONCE_LEN + TAG_LEN || raw[0] != TOKEN_VERSION {
        return Err(SecurePassError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = raw[1..].split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| SecurePassError::DecryptionFailed)?;

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| SecurePassError::DecryptionFailed)
}

/// Encrypt a UTF-8 string.
pub fn encrypt_str(key: &DerivedKey, plaintext: &str) -> Result<Vec<u8>> {
    encrypt(key, plaintext.as_bytes())
}

/// Decrypt a token whose plaintext must be UTF-8.
///
/// Non-UTF-8 plaintext is treated like any other decryption failure.
pub fn decrypt_str(key: &DerivedKey, token: &[u8]) -> Result<String> {
    let bytes = decrypt(key, token)?;
    String::from_utf8(bytes).map_err(|_| SecurePassError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> DerivedKey {
        DerivedKey::new([byte; 32])
    }

    #[test]
    fn token_is_url_safe_ascii() {
        let token = encrypt(&key(1), b"hello").unwrap();
        assert!(token
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'=')));
    }

    #[test]
    fn trailing_newline_is_tolerated() {
        let k = key(2);
        let mut token = encrypt(&k, b"value").unwrap();
        token.push(b'\n');
        assert_eq!(decrypt(&k, &token).unwrap(), b"value");
    }

    #[test]
    fn unknown_version_is_rejected() {
        let k = key(3);
        let token = encrypt(&k, b"value").unwrap();
        let mut raw = URL_SAFE.decode(&token).unwrap();
        raw[0] = 0x80;
        let forged = URL_SAFE.encode(raw).into_bytes();
        assert!(matches!(
            decrypt(&k, &forged),
            Err(SecurePassError::DecryptionFailed)
        ));
    }

    #[test]
    fn garbage_input_is_a_clean_failure() {
        let k = key(4);
        assert!(decrypt(&k, b"").is_err());
        assert!(decrypt(&k, b"!!!not-base64!!!").is_err());
        assert!(decrypt(&k, URL_SAFE.encode([1u8; 10]).as_bytes()).is_err());
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let k = key(5);
        let token = encrypt(&k, b"").unwrap();
        assert_eq!(decrypt(&k, &token).unwrap(), b"");
    }
}
