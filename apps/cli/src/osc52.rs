use std::io::Write;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use hypr_explain_session::{Clipboard, ClipboardError};

/// Terminal clipboard via the OSC 52 escape sequence. Terminals that do not
/// support it ignore the sequence.
///
/// The sequence goes to stderr so stdout stays clean for `--json` pipelines.
pub struct Osc52Clipboard;

pub fn write_osc52(out: &mut impl Write, text: &str) -> std::io::Result<()> {
    write!(out, "\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))?;
    out.flush()
}

impl Clipboard for Osc52Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        write_osc52(&mut std::io::stderr().lock(), text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_payload_as_base64() {
        let mut out = Vec::new();
        write_osc52(&mut out, "hi").unwrap();
        assert_eq!(out, b"\x1b]52;c;aGk=\x07");
    }
}
