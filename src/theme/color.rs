//! Colors with degradation to whatever the terminal supports

use crate::terminal::TerminalCapabilities;

/// Color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// True color RGB
    Rgb(u8, u8, u8),
    /// 16-color ANSI, emitted as-is on every terminal
    Ansi16(AnsiColor),
}

/// 16-color ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r, g, b)
    }

    /// Parse a `#RRGGBB` (or `RRGGBB`) hex string
    pub fn hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub const fn white() -> Self {
        Color::Rgb(255, 255, 255)
    }

    pub const fn black() -> Self {
        Color::Rgb(0, 0, 0)
    }

    pub const fn dark_gray() -> Self {
        Color::Rgb(128, 128, 128)
    }

    /// Linear mix towards `other`; `amount` 0.0 keeps self, 1.0 yields other
    pub fn mix(self, other: Color, amount: f32) -> Color {
        let t = amount.clamp(0.0, 1.0);
        let (r1, g1, b1) = self.to_rgb();
        let (r2, g2, b2) = other.to_rgb();
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color::Rgb(lerp(r1, r2), lerp(g1, g2), lerp(b1, b2))
    }

    /// Foreground escape sequence degraded to terminal capabilities
    pub fn degrade(&self, caps: &TerminalCapabilities) -> String {
        match *self {
            Color::Ansi16(ansi) => ansi.fg_code(),
            Color::Rgb(r, g, b) if caps.truecolor => format!("\x1b[38;2;{};{};{}m", r, g, b),
            Color::Rgb(r, g, b) if caps.colors_256 => format!("\x1b[38;5;{}m", rgb_to_256(r, g, b)),
            Color::Rgb(r, g, b) => rgb_to_ansi16(r, g, b).fg_code(),
        }
    }

    /// Background escape sequence degraded to terminal capabilities
    pub fn bg(&self, caps: &TerminalCapabilities) -> String {
        match *self {
            Color::Ansi16(ansi) => ansi.bg_code(),
            Color::Rgb(r, g, b) if caps.truecolor => format!("\x1b[48;2;{};{};{}m", r, g, b),
            Color::Rgb(r, g, b) if caps.colors_256 => format!("\x1b[48;5;{}m", rgb_to_256(r, g, b)),
            Color::Rgb(r, g, b) => rgb_to_ansi16(r, g, b).bg_code(),
        }
    }

    fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Ansi16(a) => a.to_rgb(),
        }
    }
}

impl AnsiColor {
    const ALL: [AnsiColor; 16] = [
        AnsiColor::Black,
        AnsiColor::Red,
        AnsiColor::Green,
        AnsiColor::Yellow,
        AnsiColor::Blue,
        AnsiColor::Magenta,
        AnsiColor::Cyan,
        AnsiColor::White,
        AnsiColor::BrightBlack,
        AnsiColor::BrightRed,
        AnsiColor::BrightGreen,
        AnsiColor::BrightYellow,
        AnsiColor::BrightBlue,
        AnsiColor::BrightMagenta,
        AnsiColor::BrightCyan,
        AnsiColor::BrightWhite,
    ];

    fn index(self) -> u8 {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(15) as u8
    }

    fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            AnsiColor::Black => (0, 0, 0),
            AnsiColor::Red => (170, 0, 0),
            AnsiColor::Green => (0, 170, 0),
            AnsiColor::Yellow => (170, 85, 0),
            AnsiColor::Blue => (0, 0, 170),
            AnsiColor::Magenta => (170, 0, 170),
            AnsiColor::Cyan => (0, 170, 170),
            AnsiColor::White => (170, 170, 170),
            AnsiColor::BrightBlack => (85, 85, 85),
            AnsiColor::BrightRed => (255, 85, 85),
            AnsiColor::BrightGreen => (85, 255, 85),
            AnsiColor::BrightYellow => (255, 255, 85),
            AnsiColor::BrightBlue => (85, 85, 255),
            AnsiColor::BrightMagenta => (255, 85, 255),
            AnsiColor::BrightCyan => (85, 255, 255),
            AnsiColor::BrightWhite => (255, 255, 255),
        }
    }

    fn fg_code(self) -> String {
        let idx = self.index();
        let code = if idx < 8 { 30 + idx } else { 90 + idx - 8 };
        format!("\x1b[{}m", code)
    }

    fn bg_code(self) -> String {
        let idx = self.index();
        let code = if idx < 8 { 40 + idx } else { 100 + idx - 8 };
        format!("\x1b[{}m", code)
    }
}

/// Convert RGB to 256-color palette index
fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return ((r - 8) / 10) + 232;
    }

    let r_idx = (r as u16 * 5 / 255) as u8;
    let g_idx = (g as u16 * 5 / 255) as u8;
    let b_idx = (b as u16 * 5 / 255) as u8;

    16 + 36 * r_idx + 6 * g_idx + b_idx
}

/// Convert RGB to the closest ANSI 16 color by dominant channel
fn rgb_to_ansi16(r: u8, g: u8, b: u8) -> AnsiColor {
    let brightness = (r as u32 + g as u32 + b as u32) / 3;
    if brightness < 32 {
        return AnsiColor::Black;
    }
    let bright = brightness > 128;
    if bright && r > 200 && g > 200 && b > 200 {
        return AnsiColor::BrightWhite;
    }

    let pick = |dark: AnsiColor, light: AnsiColor| if bright { light } else { dark };
    let mixed = if bright { 150 } else { 100 };

    if r > g && r > b {
        pick(AnsiColor::Red, AnsiColor::BrightRed)
    } else if g > r && g > b {
        pick(AnsiColor::Green, AnsiColor::BrightGreen)
    } else if b > r && b > g {
        pick(AnsiColor::Blue, AnsiColor::BrightBlue)
    } else if r > mixed && g > mixed {
        pick(AnsiColor::Yellow, AnsiColor::BrightYellow)
    } else if r > mixed && b > mixed {
        pick(AnsiColor::Magenta, AnsiColor::BrightMagenta)
    } else if g > mixed && b > mixed {
        pick(AnsiColor::Cyan, AnsiColor::BrightCyan)
    } else {
        pick(AnsiColor::BrightBlack, AnsiColor::White)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(truecolor: bool, colors_256: bool) -> TerminalCapabilities {
        TerminalCapabilities {
            truecolor,
            colors_256,
            mouse: true,
        }
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::hex("#6366F1"), Some(Color::Rgb(0x63, 0x66, 0xF1)));
        assert_eq!(Color::hex("10b981"), Some(Color::Rgb(0x10, 0xB9, 0x81)));
        assert_eq!(Color::hex("#12345"), None);
        assert_eq!(Color::hex("#GG0000"), None);
    }

    #[test]
    fn test_rgb_to_256() {
        assert_eq!(rgb_to_256(255, 255, 255), 231);
        assert_eq!(rgb_to_256(0, 0, 0), 16);

        let gray_idx = rgb_to_256(128, 128, 128);
        assert!((232..=255).contains(&gray_idx));
    }

    #[test]
    fn test_color_degradation() {
        let red = Color::rgb(239, 68, 68);

        assert_eq!(red.degrade(&caps(true, true)), "\x1b[38;2;239;68;68m");
        assert!(red.degrade(&caps(false, true)).starts_with("\x1b[38;5;"));
        assert_eq!(red.degrade(&caps(false, false)), "\x1b[31m");
        assert_eq!(red.bg(&caps(false, false)), "\x1b[41m");
    }

    #[test]
    fn test_mix() {
        let black = Color::black();
        assert_eq!(black.mix(Color::white(), 0.0), black);
        assert_eq!(black.mix(Color::white(), 1.0), Color::white());
        assert_eq!(black.mix(Color::white(), 0.5), Color::rgb(128, 128, 128));
    }
}
