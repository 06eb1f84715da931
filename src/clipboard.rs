// src/clipboard.rs
// =============================================================================
// Copies the rendered tree to the clipboard and tracks the "Copied!" state.
//
// We use the OSC 52 terminal escape sequence: the text is base64-encoded,
// wrapped in "\x1b]52;c;...\x07" and written to stderr (stdout may be
// redirected into a file). The terminal, not us, puts it on the system
// clipboard, which also works over SSH. Inside tmux
// the sequence has to be wrapped once more so tmux passes it through.
//
// The "Copied!" feedback is a flag that turns on after a successful copy
// and switches itself off 2 seconds later.
//
// Rust concepts:
// - Traits: Clipboard lets tests swap in a fake
// - Arc<AtomicBool>: a flag shared with a background tokio task
// =============================================================================

use crate::error::TreeError;
use base64::Engine;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

const OSC52_PREFIX: &str = "\x1b]52;c;";
const OSC52_SUFFIX: &str = "\x07";
const TMUX_PREFIX: &str = "\x1bPtmux;\x1b\x1b]52;c;";
const TMUX_SUFFIX: &str = "\x07\x1b\\";

// Many terminals cap OSC 52 payloads; stay well under the common limits
pub const OSC52_MAX_BYTES: usize = 100 * 1024;

/// How long "Copied!" stays visible
pub const FEEDBACK_DURATION: Duration = Duration::from_secs(2);

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), TreeError>;
}

// Clipboard backed by an OSC 52 sequence written to `out` (stderr in the app)
pub struct Osc52Clipboard<W: Write> {
    out: W,
    in_tmux: bool,
}

impl Osc52Clipboard<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr(), std::env::var_os("TMUX").is_some())
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W, in_tmux: bool) -> Self {
        Osc52Clipboard { out, in_tmux }
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), TreeError> {
        let sequence = build_sequence(text, self.in_tmux)?;
        self.out
            .write_all(sequence.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| TreeError::ClipboardFailure(e.to_string()))
    }
}

pub fn build_sequence(text: &str, in_tmux: bool) -> Result<String, TreeError> {
    let bytes = text.as_bytes();
    if bytes.len() > OSC52_MAX_BYTES {
        return Err(TreeError::ClipboardFailure(format!(
            "text too large for the terminal clipboard ({} KB, limit {} KB)",
            bytes.len() / 1024,
            OSC52_MAX_BYTES / 1024
        )));
    }

    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    if in_tmux {
        Ok(format!("{TMUX_PREFIX}{encoded}{TMUX_SUFFIX}"))
    } else {
        Ok(format!("{OSC52_PREFIX}{encoded}{OSC52_SUFFIX}"))
    }
}

// The "Copied!" flag
//
// Clones share the same flag, so the app can hand one to a status line
// while keeping another to copy with.
#[derive(Debug, Clone, Default)]
pub struct CopyFeedback {
    copied: Arc<AtomicBool>,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_copied(&self) -> bool {
        self.copied.load(Ordering::SeqCst)
    }

    // Copies `text` and turns the flag on for FEEDBACK_DURATION
    //
    // Must be called inside a tokio runtime. The returned handle finishes
    // when the flag has been switched back off.
    pub fn copy(&self, clipboard: &mut dyn Clipboard, text: &str) -> Result<JoinHandle<()>, TreeError> {
        clipboard.write_text(text)?;
        debug!(bytes = text.len(), "Copied tree to clipboard");

        self.copied.store(true, Ordering::SeqCst);
        let copied = Arc::clone(&self.copied);
        Ok(tokio::spawn(async move {
            tokio::time::sleep(FEEDBACK_DURATION).await;
            copied.store(false, Ordering::SeqCst);
        }))
    }
}
