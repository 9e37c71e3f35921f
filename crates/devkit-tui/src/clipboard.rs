#[cfg(test)]
use std::sync::{
    Arc,
    Mutex,
};

use anyhow::{
    Context,
    Result,
};

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard, opened on first use and then kept open: X11 and
/// Wayland selections disappear once their owner is dropped.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().context("Clipboard unavailable")?,
        };

        self.inner
            .insert(clipboard)
            .set_text(text)
            .context("Failed to write to the clipboard")
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Vec<String>>>,
    unavailable: bool,
}

#[cfg(test)]
impl MemoryClipboard {
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    pub fn contents(&self) -> Vec<String> {
        self.contents
            .lock()
            .map(|contents| contents.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.unavailable {
            anyhow::bail!("Clipboard unavailable");
        }

        match self.contents.lock() {
            Ok(mut contents) => contents.push(text.to_string()),
            Err(_) => anyhow::bail!("Clipboard lock poisoned"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_records_copies() {
        let clipboard = MemoryClipboard::default();
        let mut writer = clipboard.clone();

        writer.set_text("devkit://tools/uuid").unwrap();
        writer.set_text("devkit://tools/hash").unwrap();

        assert_eq!(
            clipboard.contents(),
            vec!["devkit://tools/uuid", "devkit://tools/hash"]
        );
    }

    #[test]
    fn test_unavailable_clipboard_fails() {
        let mut clipboard = MemoryClipboard::unavailable();

        let err = clipboard.set_text("anything").unwrap_err();

        assert_eq!(err.to_string(), "Clipboard unavailable");
        assert!(clipboard.contents().is_empty());
    }
}
