//! System clipboard backed by `arboard`.
//!
//! The platform clipboard is acquired for each copy and released when the
//! copy is done. On Linux the process owning the selection must keep serving
//! it until another client takes over, otherwise the text vanishes when the
//! handle drops (X11 and Wayland without a clipboard manager). There the
//! handle lives on a short-lived thread that waits for the handover.

use thresh_core::transport::ClipboardSink;
use thresh_types::error::ClipboardError;

#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "linux")]
impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        use arboard::SetExtLinux;

        let (ready_tx, ready_rx) = std::sync::mpsc::channel();
        let text = text.to_string();

        std::thread::Builder::new()
            .name("thresh-clipboard".into())
            .spawn(move || {
                let mut clipboard = match arboard::Clipboard::new() {
                    Ok(clipboard) => {
                        let _ = ready_tx.send(Ok(()));
                        clipboard
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(ClipboardError::Failed(e.to_string())));
                        return;
                    }
                };
                // Blocks until another client owns the selection.
                if let Err(e) = clipboard.set().wait().text(text) {
                    tracing::warn!("Clipboard handover failed: {e}");
                }
            })
            .map_err(|e| ClipboardError::Failed(e.to_string()))?;

        ready_rx
            .recv()
            .map_err(|e| ClipboardError::Failed(e.to_string()))?
    }
}

#[cfg(not(target_os = "linux"))]
impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Failed(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Failed(e.to_string()))
    }
}
