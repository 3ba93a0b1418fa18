//! Vault module — encrypted credential storage.
//!
//! This module provides:
//! - The on-disk layout and `MasterConfig` (`format`)
//! - Site slugs and credential payloads (`credential`)
//! - Filesystem persistence via `VaultStore` (`store`)
//! - The `VaultSession` lifecycle state machine (`session`)

pub mod credential;
pub mod format;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use credential::{Credential, SiteSlug};
pub use format::MasterConfig;
pub use session::{SessionState, VaultSession};
pub use store::VaultStore;
