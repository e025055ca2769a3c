// console status lines and the clipboard sink

use std::time::Duration;

use console::style;

use crate::ai::CommitMessage;
use crate::error::ClipboardError;

/// styled status lines on stdout/stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct Output;

impl Output {
    pub fn error(&self, message: impl std::fmt::Display) {
        eprintln!("{} {}", style("✖").red().bold(), message);
    }

    pub fn success(&self, message: impl std::fmt::Display) {
        println!("{} {}", style("✓").green().bold(), message);
    }

    pub fn info(&self, message: impl std::fmt::Display) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn warning(&self, message: impl std::fmt::Display) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn dim(&self, message: impl std::fmt::Display) {
        println!("{}", style(message).dim());
    }

    pub fn divider(&self) {
        println!("{}", style("─".repeat(50)).dim());
    }

    pub fn header(&self, title: &str) {
        println!("\n{}\n", style(title).cyan().bold());
    }

    pub fn display_commit_message(&self, message: &CommitMessage, model: Option<&str>) {
        self.header("Generated Commit Message");
        if let Some(model) = model {
            self.dim(format!("Model: {model}"));
            println!();
        }
        println!("{}", style(&message.header).cyan());

        if let Some(body) = &message.body {
            println!();
            println!("{}", style(body).dim());
        }

        self.divider();
    }

    /// copy the full message; on failure print it so it can be copied by hand
    pub fn copy_commit_message(
        &self,
        clipboard: &mut dyn Clipboard,
        message: &CommitMessage,
    ) -> Result<(), ClipboardError> {
        let full_message = message.full_text();
        match clipboard.set_text(&full_message) {
            Ok(()) => {
                self.success("Commit message copied to clipboard!");
                Ok(())
            }
            Err(e) => {
                self.error("Failed to copy to clipboard");
                self.dim("Copy the message below manually:");
                println!();
                println!("{full_message}");
                println!();
                Err(e)
            }
        }
    }
}

/// destination for the accepted message
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// how long x11/wayland ownership is held after a copy so a clipboard
/// manager can take the contents before we exit
pub const LINUX_CLIPBOARD_HOLD: Duration = Duration::from_secs(2);

/// the operating system clipboard
///
/// the handle is opened on first use and kept for the rest of the run;
/// on linux the selection is only served while its owner is alive.
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
    hold: Duration,
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self {
            handle: None,
            hold: LINUX_CLIPBOARD_HOLD,
        }
    }
}

impl SystemClipboard {
    pub fn with_hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.handle.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?;
            self.handle = Some(clipboard);
        }
        self.handle
            .as_mut()
            .ok_or_else(|| ClipboardError("clipboard unavailable".to_string()))
    }
}

impl Clipboard for SystemClipboard {
    #[cfg(target_os = "linux")]
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        use arboard::SetExtLinux;

        let deadline = std::time::Instant::now() + self.hold;
        self.handle()?
            .set()
            .wait_until(deadline)
            .text(text)
            .map_err(|e| ClipboardError(e.to_string()))
    }

    #[cfg(not(target_os = "linux"))]
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.handle()?
            .set_text(text)
            .map_err(|e| ClipboardError(e.to_string()))
    }
}
