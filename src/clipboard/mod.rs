//! Copying a poem to the clipboard, with a short-lived "copied" indicator.

use std::time::Duration;

use tokio::time::Instant;

use crate::error::PraiseError;

/// How long the indicator stays on after a successful copy.
pub const COPIED_WINDOW: Duration = Duration::from_secs(2);

/// Something text can be written to.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), PraiseError>;
}

/// The system clipboard, through `arboard`.
#[cfg(feature = "cli")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "cli")]
impl SystemClipboard {
    pub fn new() -> Result<Self, PraiseError> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| PraiseError::ClipboardFailure(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "cli")]
impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), PraiseError> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| PraiseError::ClipboardFailure(e.to_string()))
    }
}

/// Tracks whether the "copied" check mark should be shown.
#[derive(Debug, Default, Clone)]
pub struct CopyIndicator {
    copied_until: Option<Instant>,
}

impl CopyIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True for [`COPIED_WINDOW`] after a successful copy.
    pub fn is_copied(&self) -> bool {
        self.copied_until
            .map(|until| Instant::now() < until)
            .unwrap_or(false)
    }

    /// Writes `poem` to `clipboard` and switches the indicator on.
    ///
    /// Does nothing while the indicator is already on. A failed write leaves
    /// the indicator off and returns a `ClipboardFailure`.
    pub fn copy<C: Clipboard + ?Sized>(
        &mut self,
        clipboard: &mut C,
        poem: &str,
    ) -> Result<(), PraiseError> {
        if self.is_copied() {
            return Ok(());
        }
        if let Err(e) = clipboard.write_text(poem) {
            log::error!("Failed to copy text: {}", e);
            return Err(match e {
                PraiseError::ClipboardFailure(_) => e,
                other => PraiseError::ClipboardFailure(other.to_string()),
            });
        }
        self.copied_until = Some(Instant::now() + COPIED_WINDOW);
        Ok(())
    }

    /// Turns the indicator off, e.g. when a new card replaces the old one.
    pub fn clear(&mut self) {
        self.copied_until = None;
    }
}
