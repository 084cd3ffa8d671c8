//! System clipboard access for `--copy`.

use arboard::Clipboard;
use tracing::debug;

use crate::error::ClipboardError;

/// Place `text` on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = Clipboard::new().map_err(ClipboardError)?;
    clipboard.set_text(text).map_err(ClipboardError)?;
    debug!(len = text.len(), "Copied message to clipboard");
    Ok(())
}
