//! Cryptographic primitives for SecurePass.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - AES-256-GCM record encryption and decryption (`encryption`)
//! - The `Salt` and in-memory `DerivedKey` types (`keys`)

pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive, ...};
pub use encryption::{decrypt, decrypt_str, encrypt, encrypt_str};
pub use kdf::{derive, derive_with_params, KdfParams};
pub use keys::{DerivedKey, Salt};
