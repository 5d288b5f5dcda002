//! Style property bags used as per-request visual overrides
//!
//! An alert carries up to three of these (container, title, message). The
//! alert stack never looks inside them; only the view resolves them against
//! the theme when drawing.

use crate::terminal::TerminalCapabilities;
use crate::theme::Color;
use std::collections::HashMap;

/// Horizontal text alignment inside a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    /// Column offset for text of `len` cells in a row of `width` cells
    pub fn offset(&self, len: u16, width: u16) -> u16 {
        let slack = width.saturating_sub(len);
        match self {
            TextAlign::Left => 0,
            TextAlign::Center => slack / 2,
            TextAlign::Right => slack,
        }
    }
}

/// A style property that can be applied when drawing
#[derive(Debug, Clone, PartialEq)]
pub enum StyleProperty {
    /// Text color
    Color(Color),
    /// Background color
    Background(Color),
    /// Text alignment
    TextAlign(TextAlign),
    /// Whether text should be bold
    Bold(bool),
    /// Whether text should be dimmed
    Dim(bool),
    /// Whether text should be italic
    Italic(bool),
    /// Whether text should be underlined
    Underline(bool),
}

/// A collection of style properties
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    properties: HashMap<&'static str, StyleProperty>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.properties.insert("color", StyleProperty::Color(color));
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.properties
            .insert("background", StyleProperty::Background(color));
        self
    }

    pub fn text_align(mut self, align: TextAlign) -> Self {
        self.properties
            .insert("text_align", StyleProperty::TextAlign(align));
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.properties.insert("bold", StyleProperty::Bold(bold));
        self
    }

    pub fn dim(mut self, dim: bool) -> Self {
        self.properties.insert("dim", StyleProperty::Dim(dim));
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.properties
            .insert("italic", StyleProperty::Italic(italic));
        self
    }

    pub fn underline(mut self, underline: bool) -> Self {
        self.properties
            .insert("underline", StyleProperty::Underline(underline));
        self
    }

    /// Get a property by key
    pub fn get(&self, key: &str) -> Option<&StyleProperty> {
        self.properties.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Merge another style into this one (other takes precedence)
    pub fn merge(mut self, other: &Style) -> Self {
        for (key, value) in &other.properties {
            self.properties.insert(key, value.clone());
        }
        self
    }

    pub fn foreground(&self) -> Option<Color> {
        match self.get("color") {
            Some(StyleProperty::Color(c)) => Some(*c),
            _ => None,
        }
    }

    pub fn background_color(&self) -> Option<Color> {
        match self.get("background") {
            Some(StyleProperty::Background(c)) => Some(*c),
            _ => None,
        }
    }

    pub fn alignment(&self) -> Option<TextAlign> {
        match self.get("text_align") {
            Some(StyleProperty::TextAlign(a)) => Some(*a),
            _ => None,
        }
    }

    fn flag(&self, key: &str) -> bool {
        matches!(
            self.get(key),
            Some(
                StyleProperty::Bold(true)
                    | StyleProperty::Dim(true)
                    | StyleProperty::Italic(true)
                    | StyleProperty::Underline(true)
            )
        )
    }

    /// ANSI prefix for this style; alignment has no escape form and is skipped
    pub fn to_ansi(&self, caps: &TerminalCapabilities) -> String {
        let mut out = String::new();
        if let Some(fg) = self.foreground() {
            out.push_str(&fg.degrade(caps));
        }
        if let Some(bg) = self.background_color() {
            out.push_str(&bg.bg(caps));
        }
        for (key, code) in [("bold", 1), ("dim", 2), ("italic", 3), ("underline", 4)] {
            if self.flag(key) {
                out.push_str(&format!("\x1b[{}m", code));
            }
        }
        out
    }
}
