//! Terminal abstraction - geometry, color capabilities, and context

use anyhow::{Context, Result};

/// Terminal geometry in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalGeometry {
    /// Terminal width in columns (characters)
    pub cols: u16,
    /// Terminal height in rows (lines)
    pub rows: u16,
}

impl TerminalGeometry {
    /// Get current terminal geometry
    pub fn detect() -> Result<Self> {
        let (cols, rows) = crossterm::terminal::size().context("Failed to get terminal size")?;
        Ok(TerminalGeometry { cols, rows })
    }

    pub fn new(cols: u16, rows: u16) -> Self {
        TerminalGeometry { cols, rows }
    }
}

/// Terminal capability detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    /// Supports 24-bit true color
    pub truecolor: bool,
    /// Supports 256 colors
    pub colors_256: bool,
    /// Supports mouse events (needed for backdrop and button clicks)
    pub mouse: bool,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities
    pub fn detect() -> Self {
        let term = std::env::var("TERM").unwrap_or_default();
        let colorterm = std::env::var("COLORTERM").unwrap_or_default();
        let kitty_window = std::env::var("KITTY_WINDOW_ID").is_ok();

        let truecolor =
            colorterm.contains("truecolor") || colorterm.contains("24bit") || kitty_window;

        // 256 color support is pretty universal now
        let colors_256 = term.contains("256") || truecolor;

        TerminalCapabilities {
            truecolor,
            colors_256,
            mouse: true,
        }
    }

    /// Fixed 16-color capabilities, independent of the environment
    pub fn basic() -> Self {
        TerminalCapabilities {
            truecolor: false,
            colors_256: false,
            mouse: false,
        }
    }
}

/// Complete terminal context combining geometry and capabilities
#[derive(Debug, Clone)]
pub struct TerminalContext {
    pub geometry: TerminalGeometry,
    pub capabilities: TerminalCapabilities,
}

impl TerminalContext {
    /// Create a new terminal context by detecting current environment
    pub fn detect() -> Result<Self> {
        Ok(TerminalContext {
            geometry: TerminalGeometry::detect()?,
            capabilities: TerminalCapabilities::detect(),
        })
    }

    /// Context for an offscreen surface of the given size
    pub fn headless(cols: u16, rows: u16) -> Self {
        TerminalContext {
            geometry: TerminalGeometry::new(cols, rows),
            capabilities: TerminalCapabilities::basic(),
        }
    }

    /// Refresh geometry (e.g., after terminal resize)
    pub fn refresh_geometry(&mut self) -> Result<()> {
        self.geometry = TerminalGeometry::detect()?;
        Ok(())
    }

    /// Get character dimensions
    pub fn char_dimensions(&self) -> (u16, u16) {
        (self.geometry.cols, self.geometry.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_context() {
        let ctx = TerminalContext::headless(80, 24);
        assert_eq!(ctx.char_dimensions(), (80, 24));
        assert!(!ctx.capabilities.truecolor);
    }

    #[test]
    fn test_capabilities_detect() {
        let caps = TerminalCapabilities::detect();
        // Truecolor always implies 256 colors
        assert!(caps.colors_256 || !caps.truecolor);
    }
}
