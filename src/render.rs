//! Rendering backend - buffered terminal output and cursor management
//!
//! Output goes through a `BufWriter` to minimize syscalls. Call `flush()`
//! (or `end_frame()`) after a batch of operations to display the output.
//! A renderer can also target an in-memory [`CaptureBuffer`] so dialogs can
//! be rendered and inspected without a terminal.

use crate::terminal::{TerminalCapabilities, TerminalContext};
use anyhow::Result;
use std::cell::RefCell;
use std::io::{self, BufWriter, Write};
use std::rc::Rc;

/// Default buffer capacity for write batching (16KB)
const WRITE_BUFFER_CAPACITY: usize = 16 * 1024;

/// Shared in-memory sink for headless rendering
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, escape sequences included
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }

    /// Written text with CSI escape sequences removed
    pub fn plain_text(&self) -> String {
        let raw = self.contents();
        let mut out = String::with_capacity(raw.len());
        let mut chars = raw.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\x1b' && chars.peek() == Some(&'[') {
                chars.next();
                // Parameters and intermediates run until the final byte (@ through ~)
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }

        out
    }

    pub fn clear(&self) {
        self.bytes.borrow_mut().clear();
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Raw terminal renderer
pub struct Renderer {
    /// Buffered writer for batching terminal output
    writer: BufWriter<Box<dyn Write>>,
    context: TerminalContext,
    in_alt_screen: bool,
}

impl Renderer {
    /// Create a renderer writing to stdout with detected terminal context
    pub fn new() -> Result<Self> {
        let context = TerminalContext::detect()?;
        tracing::debug!(
            cols = context.geometry.cols,
            rows = context.geometry.rows,
            truecolor = context.capabilities.truecolor,
            "renderer attached to terminal"
        );

        Ok(Self::with_writer(Box::new(io::stdout()), context))
    }

    /// Create a renderer that discards output (for tests and offscreen layout)
    pub fn headless(cols: u16, rows: u16) -> Self {
        Self::with_writer(Box::new(io::sink()), TerminalContext::headless(cols, rows))
    }

    /// Create a renderer whose output can be read back from the returned buffer
    pub fn capture(cols: u16, rows: u16) -> (Self, CaptureBuffer) {
        let buffer = CaptureBuffer::new();
        let renderer = Self::with_writer(
            Box::new(buffer.clone()),
            TerminalContext::headless(cols, rows),
        );
        (renderer, buffer)
    }

    fn with_writer(writer: Box<dyn Write>, context: TerminalContext) -> Self {
        Renderer {
            writer: BufWriter::with_capacity(WRITE_BUFFER_CAPACITY, writer),
            context,
            in_alt_screen: false,
        }
    }

    /// Enter alternative screen buffer
    ///
    /// Note: This immediately flushes to ensure the screen switch happens.
    pub fn enter_alt_screen(&mut self) -> Result<()> {
        if !self.in_alt_screen {
            write!(self.writer, "\x1b[?1049h")?;
            self.writer.flush()?;
            self.in_alt_screen = true;
        }
        Ok(())
    }

    /// Exit alternative screen buffer
    pub fn exit_alt_screen(&mut self) -> Result<()> {
        if self.in_alt_screen {
            write!(self.writer, "\x1b[?1049l")?;
            self.writer.flush()?;
            self.in_alt_screen = false;
        }
        Ok(())
    }

    /// Clear the screen
    pub fn clear(&mut self) -> Result<()> {
        write!(self.writer, "\x1b[2J")?;
        Ok(())
    }

    /// Move cursor to position (0-indexed)
    #[inline]
    pub fn move_cursor(&mut self, col: u16, row: u16) -> Result<()> {
        write!(self.writer, "\x1b[{};{}H", row + 1, col + 1)?;
        Ok(())
    }

    /// Hide cursor
    ///
    /// Note: Buffered - call flush() to ensure it takes effect immediately.
    pub fn hide_cursor(&mut self) -> Result<()> {
        write!(self.writer, "\x1b[?25l")?;
        Ok(())
    }

    /// Show cursor
    pub fn show_cursor(&mut self) -> Result<()> {
        write!(self.writer, "\x1b[?25h")?;
        Ok(())
    }

    /// Write text at current cursor position
    #[inline]
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        write!(self.writer, "{}", text)?;
        Ok(())
    }

    /// Write text with ANSI color/style codes, resetting afterwards
    #[inline]
    pub fn write_styled(&mut self, text: &str, style: &str) -> Result<()> {
        if style.is_empty() {
            return self.write_text(text);
        }
        write!(self.writer, "{}{}\x1b[0m", style, text)?;
        Ok(())
    }

    /// Write a repeated character
    #[inline]
    pub fn write_repeated(&mut self, ch: char, count: usize) -> Result<()> {
        for _ in 0..count {
            write!(self.writer, "{}", ch)?;
        }
        Ok(())
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Get current terminal context
    pub fn context(&self) -> &TerminalContext {
        &self.context
    }

    pub fn capabilities(&self) -> TerminalCapabilities {
        self.context.capabilities
    }

    /// Refresh terminal geometry (call after resize)
    pub fn refresh_geometry(&mut self) -> Result<()> {
        self.context.refresh_geometry()
    }

    /// Begin a render frame - hides cursor while drawing
    pub fn begin_frame(&mut self) -> Result<()> {
        self.hide_cursor()
    }

    /// End a render frame - flushes buffered output
    pub fn end_frame(&mut self) -> Result<()> {
        self.flush()
    }

    /// Check if the renderer is in alternative screen mode
    pub fn in_alt_screen(&self) -> bool {
        self.in_alt_screen
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        // Restore terminal state even during panics
        let _ = self.exit_alt_screen();
        let _ = self.show_cursor();
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_round_trip() {
        let (mut renderer, buffer) = Renderer::capture(40, 10);
        renderer.move_cursor(3, 2).unwrap();
        renderer.write_styled("hello", "\x1b[1m").unwrap();
        renderer.flush().unwrap();

        assert_eq!(buffer.contents(), "\x1b[3;4H\x1b[1mhello\x1b[0m");
        assert_eq!(buffer.plain_text(), "hello");
    }

    #[test]
    fn test_plain_text_keeps_unicode() {
        let (mut renderer, buffer) = Renderer::capture(40, 10);
        renderer.write_styled("╭─ ✔ Saved", "\x1b[38;5;42m").unwrap();
        renderer.flush().unwrap();

        assert_eq!(buffer.plain_text(), "╭─ ✔ Saved");

        buffer.clear();
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn test_headless_geometry() {
        let renderer = Renderer::headless(100, 30);
        assert_eq!(renderer.context().char_dimensions(), (100, 30));
        assert!(!renderer.in_alt_screen());
    }
}
