//! System clipboard access.
//!
//! Copying is strictly optional: callers discard the returned `Result`
//! with an explicit `let _ =` so the never-block-the-flow contract stays
//! visible at the call site.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copies text to the system clipboard.
pub fn copy(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("Failed to copy to clipboard")
}
