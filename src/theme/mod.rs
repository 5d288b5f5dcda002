//! Theming for alert cards with automatic color degradation

mod color;

pub use color::{AnsiColor, Color};

use crate::button::ButtonRole;
use crate::request::AlertKind;
use crate::terminal::TerminalCapabilities;

/// Border style for the alert card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    None,
    Single,
    Double,
    #[default]
    Rounded,
    Heavy,
    Ascii,
}

/// Accent colors and glyph for one alert kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Icon, border and primary button color
    pub primary: Color,
    /// Tinted background behind the icon
    pub light: Color,
    pub icon: String,
}

impl Palette {
    pub fn new(primary: Color, light: Color, icon: impl Into<String>) -> Self {
        Palette {
            primary,
            light,
            icon: icon.into(),
        }
    }
}

/// Colors and border characters used to draw alert cards
#[derive(Debug, Clone)]
pub struct Theme {
    palettes: [Palette; 5],

    pub surface: Color,
    pub title_fg: Color,
    pub message_fg: Color,
    pub input_bg: Color,
    pub input_fg: Color,
    pub input_border: Color,
    pub button_fg: Color,
    pub cancel_fg: Color,
    pub cancel_bg: Color,
    pub destructive_bg: Color,
    pub close_icon_fg: Color,

    pub title_bold: bool,
    pub border_style: BorderStyle,

    caps: TerminalCapabilities,
}

impl Theme {
    /// Create the default light theme for the given terminal
    pub fn new(caps: TerminalCapabilities) -> Self {
        Theme {
            palettes: [
                Palette::new(Color::rgb(0x63, 0x66, 0xF1), Color::rgb(0xEE, 0xF2, 0xFF), "ℹ"),
                Palette::new(Color::rgb(0x10, 0xB9, 0x81), Color::rgb(0xEC, 0xFD, 0xF5), "✔"),
                Palette::new(Color::rgb(0xEF, 0x44, 0x44), Color::rgb(0xFE, 0xF2, 0xF2), "✖"),
                Palette::new(Color::rgb(0xF5, 0x9E, 0x0B), Color::rgb(0xFF, 0xFB, 0xEB), "⚠"),
                Palette::new(Color::rgb(0x3B, 0x82, 0xF6), Color::rgb(0xEF, 0xF6, 0xFF), "ℹ"),
            ],

            surface: Color::white(),
            title_fg: Color::rgb(0x1F, 0x29, 0x37),
            message_fg: Color::rgb(0x6B, 0x72, 0x80),
            input_bg: Color::rgb(0xF9, 0xFA, 0xFB),
            input_fg: Color::rgb(0x1F, 0x29, 0x37),
            input_border: Color::rgb(0xE5, 0xE7, 0xEB),
            button_fg: Color::white(),
            cancel_fg: Color::rgb(0x4B, 0x55, 0x63),
            cancel_bg: Color::rgb(0xF3, 0xF4, 0xF6),
            destructive_bg: Color::rgb(0xEF, 0x44, 0x44),
            close_icon_fg: Color::rgb(0x9C, 0xA3, 0xAF),

            title_bold: true,
            border_style: BorderStyle::Rounded,

            caps,
        }
    }

    /// Replace the palette used for one alert kind
    pub fn with_palette(mut self, kind: AlertKind, palette: Palette) -> Self {
        self.palettes[kind.index()] = palette;
        self
    }

    pub fn with_border_style(mut self, style: BorderStyle) -> Self {
        self.border_style = style;
        self
    }

    pub fn palette(&self, kind: AlertKind) -> &Palette {
        &self.palettes[kind.index()]
    }

    pub fn caps(&self) -> &TerminalCapabilities {
        &self.caps
    }

    /// Foreground escape for `color`
    pub fn fg(&self, color: Color) -> String {
        color.degrade(&self.caps)
    }

    /// Background escape for `color`
    pub fn bg(&self, color: Color) -> String {
        color.bg(&self.caps)
    }

    /// Foreground on background
    pub fn pair(&self, fg: Color, bg: Color) -> String {
        format!("{}{}", self.fg(fg), self.bg(bg))
    }

    pub fn surface_style(&self) -> String {
        self.bg(self.surface)
    }

    pub fn border_style_for(&self, kind: AlertKind) -> String {
        self.pair(self.palette(kind).primary, self.surface)
    }

    pub fn icon_style(&self, kind: AlertKind) -> String {
        let palette = self.palette(kind);
        format!("{}\x1b[1m", self.pair(palette.primary, palette.light))
    }

    pub fn title_style(&self) -> String {
        let mut style = self.pair(self.title_fg, self.surface);
        if self.title_bold {
            style.push_str("\x1b[1m");
        }
        style
    }

    pub fn message_style(&self) -> String {
        self.pair(self.message_fg, self.surface)
    }

    pub fn close_icon_style(&self) -> String {
        self.pair(self.close_icon_fg, self.surface)
    }

    /// Text field style; the border takes the accent color while focused
    pub fn input_style(&self) -> String {
        self.pair(self.input_fg, self.input_bg)
    }

    pub fn input_border_style(&self, kind: AlertKind, focused: bool) -> String {
        let border = if focused {
            self.palette(kind).primary
        } else {
            self.input_border
        };
        self.pair(border, self.surface)
    }

    /// Button face style by role; focused buttons are drawn bold and underlined
    pub fn button_style(&self, kind: AlertKind, role: ButtonRole, focused: bool) -> String {
        let mut style = match role {
            ButtonRole::Default => self.pair(self.button_fg, self.palette(kind).primary),
            ButtonRole::Cancel => self.pair(self.cancel_fg, self.cancel_bg),
            ButtonRole::Destructive => self.pair(self.button_fg, self.destructive_bg),
        };
        if focused {
            style.push_str("\x1b[1m\x1b[4m");
        }
        style
    }

    /// Get border characters for current border style
    pub fn border_chars(&self) -> BorderChars {
        match self.border_style {
            BorderStyle::None => BorderChars::none(),
            BorderStyle::Single => BorderChars::single(),
            BorderStyle::Double => BorderChars::double(),
            BorderStyle::Rounded => BorderChars::rounded(),
            BorderStyle::Heavy => BorderChars::heavy(),
            BorderStyle::Ascii => BorderChars::ascii(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::new(TerminalCapabilities::detect())
    }
}

/// Border characters for drawing boxes
#[derive(Debug, Clone)]
pub struct BorderChars {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl BorderChars {
    pub fn none() -> Self {
        BorderChars {
            horizontal: ' ',
            vertical: ' ',
            top_left: ' ',
            top_right: ' ',
            bottom_left: ' ',
            bottom_right: ' ',
        }
    }

    pub fn single() -> Self {
        BorderChars {
            horizontal: '─',
            vertical: '│',
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
        }
    }

    pub fn double() -> Self {
        BorderChars {
            horizontal: '═',
            vertical: '║',
            top_left: '╔',
            top_right: '╗',
            bottom_left: '╚',
            bottom_right: '╝',
        }
    }

    pub fn rounded() -> Self {
        BorderChars {
            horizontal: '─',
            vertical: '│',
            top_left: '╭',
            top_right: '╮',
            bottom_left: '╰',
            bottom_right: '╯',
        }
    }

    pub fn heavy() -> Self {
        BorderChars {
            horizontal: '━',
            vertical: '┃',
            top_left: '┏',
            top_right: '┓',
            bottom_left: '┗',
            bottom_right: '┛',
        }
    }

    pub fn ascii() -> Self {
        BorderChars {
            horizontal: '-',
            vertical: '|',
            top_left: '+',
            top_right: '+',
            bottom_left: '+',
            bottom_right: '+',
        }
    }
}
