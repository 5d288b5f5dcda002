//! Card chrome for alert dialogs
//!
//! Positions a bordered box centered in the screen, fills it with the surface
//! color, and draws the optional × close icon on the top border. Content is
//! drawn by the caller into [`Card::content_bounds`].

use crate::context::RenderContext;
use crate::layout::Rect;
use crate::render::Renderer;
use crate::style::{Style, TextAlign};
use crate::theme::Color;
use anyhow::Result;

const CLOSE_GLYPH: &str = "×";

/// Centered, bordered box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    max_width: u16,
    min_width: u16,
    /// Blank columns between the border and the content
    padding: u16,
    close_icon: bool,
}

impl Card {
    pub fn new() -> Self {
        Card {
            max_width: 48,
            min_width: 24,
            padding: 2,
            close_icon: true,
        }
    }

    pub fn with_max_width(mut self, width: u16) -> Self {
        self.max_width = width;
        self
    }

    pub fn with_close_icon(mut self, show: bool) -> Self {
        self.close_icon = show;
        self
    }

    /// Width of the content area for a card placed in `parent`
    pub fn content_width(&self, parent: Rect) -> u16 {
        self.outer_width(parent).saturating_sub(2 + self.padding * 2)
    }

    fn outer_width(&self, parent: Rect) -> u16 {
        let room = parent.width.saturating_sub(4);
        self.max_width.min(room).max(self.min_width.min(parent.width))
    }

    /// Card rectangle for content `content_height` rows tall
    pub fn bounds(&self, parent: Rect, content_height: u16) -> Rect {
        // Border plus one blank row above and below the content
        parent.centered(self.outer_width(parent), content_height.saturating_add(4))
    }

    pub fn content_bounds(&self, card: Rect) -> Rect {
        Rect::new(
            card.x.saturating_add(1 + self.padding),
            card.y.saturating_add(2),
            card.width.saturating_sub(2 + self.padding * 2),
            card.height.saturating_sub(4),
        )
    }

    /// Clickable area of the close icon
    pub fn close_icon_rect(&self, card: Rect) -> Option<Rect> {
        if !self.close_icon || card.width < 6 {
            return None;
        }
        Some(Rect::new(card.right() - 4, card.y, 3, 1))
    }

    /// Draw border, fill and close icon
    ///
    /// `accent` colors the border; a container override may replace the fill
    /// (background) and the border (foreground).
    pub fn draw(
        &self,
        renderer: &mut Renderer,
        card: Rect,
        ctx: &RenderContext,
        accent: Color,
        container: Option<&Style>,
    ) -> Result<()> {
        if card.width < 2 || card.height < 2 {
            return Ok(());
        }

        let theme = ctx.theme;
        let fill_color = container
            .and_then(Style::background_color)
            .unwrap_or(theme.surface);
        let border_color = container.and_then(Style::foreground).unwrap_or(accent);
        let fill = theme.bg(fill_color);
        let border = theme.pair(border_color, fill_color);
        let chars = theme.border_chars();
        let inner = (card.width - 2) as usize;

        renderer.move_cursor(card.x, card.y)?;
        let top: String = std::iter::once(chars.top_left)
            .chain(std::iter::repeat_n(chars.horizontal, inner))
            .chain(std::iter::once(chars.top_right))
            .collect();
        renderer.write_styled(&top, &border)?;

        for y in 1..card.height - 1 {
            renderer.move_cursor(card.x, card.y + y)?;
            renderer.write_styled(&chars.vertical.to_string(), &border)?;
            renderer.write_styled(&" ".repeat(inner), &fill)?;
            renderer.write_styled(&chars.vertical.to_string(), &border)?;
        }

        renderer.move_cursor(card.x, card.bottom() - 1)?;
        let bottom: String = std::iter::once(chars.bottom_left)
            .chain(std::iter::repeat_n(chars.horizontal, inner))
            .chain(std::iter::once(chars.bottom_right))
            .collect();
        renderer.write_styled(&bottom, &border)?;

        if let Some(icon) = self.close_icon_rect(card) {
            renderer.move_cursor(icon.x, icon.y)?;
            let glyph = format!(" {} ", CLOSE_GLYPH);
            renderer.write_styled(&glyph, &theme.pair(theme.close_icon_fg, fill_color))?;
        }

        Ok(())
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::new()
    }
}

/// Word-wrap `text` to lines of at most `width` characters
///
/// Explicit newlines start a new line. Words longer than `width` are split.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = width as usize;
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0usize;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
            if needed > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.extend(word.iter());
            line_len += word.len();
        }

        lines.push(line);
    }
    lines
}

/// Write `text` into a one-row rect with the given alignment, padding the
/// rest of the row with `style`'s background
pub fn write_aligned(
    renderer: &mut Renderer,
    row: Rect,
    text: &str,
    style: &str,
    align: TextAlign,
) -> Result<()> {
    let shown: String = text.chars().take(row.width as usize).collect();
    let len = shown.chars().count() as u16;
    let offset = align.offset(len, row.width);
    let trailing = row.width - offset - len;

    renderer.move_cursor(row.x, row.y)?;
    let line = format!(
        "{}{}{}",
        " ".repeat(offset as usize),
        shown,
        " ".repeat(trailing as usize)
    );
    renderer.write_styled(&line, style)
}
