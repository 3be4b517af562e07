pub type ClipboardError = Box<dyn std::error::Error + Send + Sync>;

/// Platform clipboard. Writes are best effort.
pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Copy `text`, swallowing failures. Returns whether the write went through.
pub fn copy_best_effort(clipboard: &dyn Clipboard, text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    match clipboard.write_text(text) {
        Ok(()) => true,
        Err(error) => {
            tracing::debug!(%error, "clipboard_write_failed");
            false
        }
    }
}
