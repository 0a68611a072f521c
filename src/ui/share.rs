//! Share plumbing for a terminal session. There is no native share sheet to
//! hand a request to, so the sink always reports the capability as absent and
//! the controller falls back to the clipboard path, implemented here as an
//! OSC 52 escape sequence written to the controlling terminal.

use std::io::{self, Write};

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::state::{ShareDisposition, ShareRequest, ShareSink};

/// Share capabilities of the terminal environment.
pub(crate) struct SystemShare;

impl ShareSink for SystemShare {
    fn native_share(&mut self, _request: &ShareRequest) -> ShareDisposition {
        // Terminals have no share sheet; the clipboard fallback is the
        // expected path, not an error.
        ShareDisposition::Unavailable
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        copy_via_osc52(text)
    }
}

/// Ask the terminal emulator to place `text` on the system clipboard via the
/// OSC 52 sequence. Emulators that ignore the sequence simply drop it; a
/// write failure on stdout is the only hard error.
fn copy_via_osc52(text: &str) -> Result<()> {
    let payload = BASE64.encode(text.as_bytes());
    let mut stdout = io::stdout();
    write!(stdout, "\x1b]52;c;{payload}\x07").context("failed to write clipboard sequence")?;
    stdout.flush().context("failed to flush clipboard sequence")
}
