//! System clipboard access for `--copy`.

use crate::errors::{Result, SecurePassError};

/// Put `text` on the system clipboard.
pub fn copy(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| SecurePassError::CommandFailed(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(text)
        .map_err(|e| SecurePassError::CommandFailed(format!("failed to copy to clipboard: {e}")))
}
