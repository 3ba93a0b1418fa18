use std::path::PathBuf;
use thiserror::Error;

use crate::vault::SessionState;

/// All errors that can occur in SecurePass.
///
/// None of the messages carry passwords, usernames, or key material.
#[derive(Debug, Error)]
pub enum SecurePassError {
    // --- Caller input ---
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong key or corrupted data")]
    DecryptionFailed,

    #[error("Incorrect master password")]
    Authentication,

    #[error("Could not decrypt credentials for '{site}' — the record may be corrupted or tampered")]
    Integrity { site: String },

    // --- Vault errors ---
    #[error("Vault already initialized at {0} (use `reset` to start over)")]
    AlreadyInitialized(PathBuf),

    #[error("Vault not initialized at {0} — run `securepass init` first")]
    NotInitialized(PathBuf),

    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    #[error("No credentials saved for '{0}'")]
    CredentialNotFound(String),

    #[error("Cannot {operation} while the vault is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    // --- IO errors ---
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Coarse classification of a [`SecurePassError`], used by the CLI to
/// choose an exit code and by callers that only care about the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Config,
    Authentication,
    Integrity,
    Storage,
    NotFound,
    State,
    Other,
}

impl SecurePassError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Config(_) => ErrorKind::Config,
            Self::Authentication => ErrorKind::Authentication,
            Self::Integrity { .. } | Self::DecryptionFailed => ErrorKind::Integrity,
            Self::Storage(_) | Self::InvalidVaultFormat(_) => ErrorKind::Storage,
            Self::CredentialNotFound(_) => ErrorKind::NotFound,
            Self::AlreadyInitialized(_) | Self::NotInitialized(_) | Self::InvalidState { .. } => {
                ErrorKind::State
            }
            Self::EncryptionFailed(_)
            | Self::Serialization(_)
            | Self::CommandFailed(_) => ErrorKind::Other,
        }
    }

    /// Process exit code for the CLI. Always non-zero.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::Config => 2,
            ErrorKind::Authentication => 3,
            ErrorKind::Integrity => 4,
            ErrorKind::Storage => 5,
            ErrorKind::NotFound => 6,
            ErrorKind::State | ErrorKind::Other => 1,
        }
    }
}

/// Convenience type alias for SecurePass results.
pub type Result<T> = std::result::Result<T, SecurePassError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_are_storage_errors() {
        let err: SecurePassError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn exit_codes_are_distinct_per_category() {
        assert_eq!(SecurePassError::Validation("x".into()).exit_code(), 2);
        assert_eq!(SecurePassError::Config("x".into()).exit_code(), 2);
        assert_eq!(SecurePassError::Authentication.exit_code(), 3);
        assert_eq!(
            SecurePassError::Integrity {
                site: "github".into()
            }
            .exit_code(),
            4
        );
        assert_eq!(
            SecurePassError::CredentialNotFound("github".into()).exit_code(),
            6
        );
        assert_eq!(
            SecurePassError::InvalidState {
                operation: "log out",
                state: SessionState::LockedAwaitingLogin,
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn invalid_state_message_names_operation_and_state() {
        let err = SecurePassError::InvalidState {
            operation: "save credentials",
            state: SessionState::LockedAwaitingLogin,
        };
        assert_eq!(
            err.to_string(),
            "Cannot save credentials while the vault is locked"
        );
    }
}
