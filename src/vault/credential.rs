//! Site identifiers and the credential payload stored per site.
//!
//! A site name such as `"My Bank"` is normalized to the slug `my_bank`,
//! which doubles as the record file stem (`my_bank.enc`).  The slug is
//! the canonical identifier; the display name is best-effort.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::errors::{Result, SecurePassError};

/// Maximum slug length in characters.
const MAX_SLUG_LEN: usize = 128;

/// A normalized, filesystem-safe site identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SiteSlug(String);

impl SiteSlug {
    /// Normalize a user-supplied site name into a slug.
    ///
    /// Lower-cases, trims, and replaces spaces with underscores, then
    /// checks the result is safe to use as a file name.
    pub fn parse(site: &str) -> Result<Self> {
        let slug = site.trim().to_lowercase().replace(' ', "_");
        Self::validate(&slug)?;
        Ok(Self(slug))
    }

    /// Recognize a slug from a record file stem, without normalizing.
    ///
    /// Returns `None` for anything `parse` could never have produced.
    pub fn from_file_stem(stem: &str) -> Option<Self> {
        let is_normalized = stem == stem.to_lowercase() && !stem.contains(' ');
        (is_normalized && Self::validate(stem).is_ok()).then(|| Self(stem.to_string()))
    }

    fn validate(slug: &str) -> Result<()> {
        if slug.is_empty() {
            return Err(SecurePassError::Validation(
                "site name cannot be empty".into(),
            ));
        }
        if slug.chars().count() > MAX_SLUG_LEN {
            return Err(SecurePassError::Validation(format!(
                "site name cannot exceed {MAX_SLUG_LEN} characters"
            )));
        }
        if slug.starts_with('.') {
            return Err(SecurePassError::Validation(format!(
                "site name '{slug}' cannot start with a period"
            )));
        }
        if !slug
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '@' | '+'))
        {
            return Err(SecurePassError::Validation(format!(
                "site name '{slug}' contains invalid characters — only letters, digits, spaces, and _ - . @ + are allowed"
            )));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Record file name for this slug, e.g. `github.enc`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.0, super::format::RECORD_EXT)
    }

    /// Best-effort display name: underscores become spaces and each word
    /// is capitalized.  `"my_bank"` → `"My Bank"`, but `"github"` gives
    /// `"Github"`, not the original `"GitHub"`.
    pub fn display_name(&self) -> String {
        self.0
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for SiteSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decrypted credentials for one site, returned by `read_credential`.
///
/// Debug output omits the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub slug: SiteSlug,
    /// The name given when the record was saved, or the title-cased slug
    /// for records that did not store one.
    pub site: String,
    pub username: String,
    pub password: String,
    pub saved_at: Option<DateTime<Utc>>,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("slug", &self.slug)
            .field("site", &self.site)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("saved_at", &self.saved_at)
            .finish()
    }
}

impl Drop for Credential {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// The JSON document that gets encrypted into `<slug>.enc`.
#[derive(Serialize, Deserialize)]
pub(crate) struct CredentialPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl CredentialPayload {
    pub fn into_credential(mut self, slug: SiteSlug) -> Credential {
        Credential {
            site: self.site.take().unwrap_or_else(|| slug.display_name()),
            slug,
            username: std::mem::take(&mut self.username),
            password: std::mem::take(&mut self.password),
            saved_at: self.saved_at,
        }
    }
}

impl Drop for CredentialPayload {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}
