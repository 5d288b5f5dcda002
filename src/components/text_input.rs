//! Single-line text field used by prompt dialogs
//!
//! Supports:
//! - Cursor positioning and movement (home, end, left, right, word jumps)
//! - Basic editing (insert, delete, backspace, Ctrl+W/K/U)
//! - Masked display for secret entry
//! - Character filtering by [`KeyboardHint`]
//!
//! Enter and Esc are left to the owning dialog.

use crate::component::Component;
use crate::context::RenderContext;
use crate::event::{Event, EventHandler, Key};
use crate::layout::Rect;
use crate::render::Renderer;
use crate::request::KeyboardHint;
use anyhow::Result;

/// Character drawn in place of each typed character in secure fields
pub const MASK_CHAR: char = '•';

/// Text input component
pub struct TextInput {
    buffer: String,
    /// Cursor position (byte offset)
    cursor: usize,
    mask: Option<char>,
    keyboard: KeyboardHint,
    focused: bool,
    dirty: bool,
}

impl TextInput {
    pub fn new() -> Self {
        TextInput {
            buffer: String::new(),
            cursor: 0,
            mask: None,
            keyboard: KeyboardHint::Default,
            focused: false,
            dirty: true,
        }
    }

    /// Hide typed text behind `mask`
    pub fn with_mask(mut self, mask: Option<char>) -> Self {
        self.mask = mask;
        self
    }

    /// Get current input value
    pub fn value(&self) -> &str {
        &self.buffer
    }

    /// Replace contents and settings; cursor goes to the end
    pub fn reset(&mut self, value: &str, mask: Option<char>, keyboard: KeyboardHint) {
        self.buffer = value.to_string();
        self.cursor = self.buffer.len();
        self.mask = mask;
        self.keyboard = keyboard;
        self.dirty = true;
    }

    /// Set the input value
    pub fn set_value(&mut self, value: &str) {
        self.buffer = value.to_string();
        self.cursor = self.buffer.len();
        self.dirty = true;
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.dirty = true;
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// What the field shows for the current buffer
    pub fn display_text(&self) -> String {
        match self.mask {
            Some(mask) => std::iter::repeat_n(mask, self.buffer.chars().count()).collect(),
            None => self.buffer.clone(),
        }
    }

    /// Insert character at cursor; rejected characters are dropped
    fn insert_char(&mut self, c: char) -> bool {
        if !self.keyboard.accepts(c) {
            return false;
        }
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.dirty = true;
        true
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn delete_char_before(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.buffer.remove(prev);
            self.cursor = prev;
            self.dirty = true;
        }
    }

    fn delete_char_at(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
            self.dirty = true;
        }
    }

    fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary();
            self.dirty = true;
        }
    }

    fn move_right(&mut self) {
        if let Some(c) = self.buffer[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
            self.dirty = true;
        }
    }

    fn move_to_start(&mut self) {
        if self.cursor != 0 {
            self.cursor = 0;
            self.dirty = true;
        }
    }

    fn move_to_end(&mut self) {
        if self.cursor != self.buffer.len() {
            self.cursor = self.buffer.len();
            self.dirty = true;
        }
    }

    /// Move cursor to previous word boundary
    fn move_word_left(&mut self) {
        let chars: Vec<(usize, char)> = self.buffer[..self.cursor].char_indices().collect();
        if chars.is_empty() {
            return;
        }

        let mut i = chars.len() - 1;
        while i > 0 && chars[i].1.is_whitespace() {
            i -= 1;
        }
        while i > 0 && !chars[i - 1].1.is_whitespace() {
            i -= 1;
        }

        self.cursor = chars[i].0;
        self.dirty = true;
    }

    /// Move cursor to next word boundary
    fn move_word_right(&mut self) {
        let chars: Vec<(usize, char)> = self.buffer[self.cursor..].char_indices().collect();
        if chars.is_empty() {
            return;
        }

        let mut i = 0;
        while i < chars.len() && !chars[i].1.is_whitespace() {
            i += 1;
        }
        while i < chars.len() && chars[i].1.is_whitespace() {
            i += 1;
        }

        self.cursor = match chars.get(i) {
            Some((offset, _)) => self.cursor + offset,
            None => self.buffer.len(),
        };
        self.dirty = true;
    }

    /// Delete word before cursor (Ctrl+W)
    fn delete_word_before(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let end = self.cursor;
        self.move_word_left();
        self.buffer.drain(self.cursor..end);
        self.dirty = true;
    }

    /// Delete from cursor to end of line (Ctrl+K)
    fn delete_to_end(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.truncate(self.cursor);
            self.dirty = true;
        }
    }

    /// Delete from cursor to start of line (Ctrl+U)
    fn delete_to_start(&mut self) {
        if self.cursor > 0 {
            self.buffer.drain(..self.cursor);
            self.cursor = 0;
            self.dirty = true;
        }
    }

    /// Insert pasted text, keeping only characters the field accepts
    fn handle_paste(&mut self, text: &str) {
        let clean: String = text.chars().filter(|c| self.keyboard.accepts(*c)).collect();
        self.buffer.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
        self.dirty = true;
    }

    fn handle_key(&mut self, key: &Key) -> bool {
        match key {
            // Rejected characters are still swallowed so they never reach the dialog
            Key::Char(c) => {
                self.insert_char(*c);
                true
            }
            Key::Enter | Key::Esc | Key::Tab | Key::BackTab => false,
            _ => self.handle_editing_key(key) || self.handle_navigation_key(key),
        }
    }

    fn handle_editing_key(&mut self, key: &Key) -> bool {
        match key {
            Key::Backspace => self.delete_char_before(),
            Key::Delete => self.delete_char_at(),
            Key::Ctrl('w') => self.delete_word_before(),
            Key::Ctrl('k') => self.delete_to_end(),
            Key::Ctrl('u') => self.delete_to_start(),
            _ => return false,
        }
        true
    }

    fn handle_navigation_key(&mut self, key: &Key) -> bool {
        match key {
            Key::Left => self.move_left(),
            Key::Right => self.move_right(),
            Key::Home | Key::Ctrl('a') => self.move_to_start(),
            Key::End | Key::Ctrl('e') => self.move_to_end(),
            // Word jumps would reveal word boundaries of a masked secret
            Key::Alt('b') if self.mask.is_none() => self.move_word_left(),
            Key::Alt('f') if self.mask.is_none() => self.move_word_right(),
            _ => return false,
        }
        true
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for TextInput {
    fn handle_event(&mut self, event: &Event) -> bool {
        if !self.focused {
            return false;
        }

        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) => {
                self.handle_paste(text);
                true
            }
            _ => false,
        }
    }

    fn on_focus(&mut self) {
        self.focused = true;
        self.dirty = true;
    }

    fn on_blur(&mut self) {
        self.focused = false;
        self.dirty = true;
    }
}

impl Component for TextInput {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        let width = bounds.width as usize;
        if width == 0 {
            self.dirty = false;
            return Ok(());
        }

        let theme = ctx.theme;
        let input_style = theme.input_style();
        renderer.move_cursor(bounds.x, bounds.y)?;

        let text: Vec<char> = self.display_text().chars().collect();
        let cursor_pos = self.buffer[..self.cursor].chars().count();

        // Scroll so the cursor cell stays visible
        let scroll = (cursor_pos + 1).saturating_sub(width);
        let visible: Vec<char> = text.iter().skip(scroll).take(width).copied().collect();
        let cursor_col = cursor_pos - scroll;

        let before: String = visible.iter().take(cursor_col).collect();
        renderer.write_styled(&before, &input_style)?;

        let used = if self.focused {
            let at = visible.get(cursor_col).copied().unwrap_or(' ');
            renderer.write_styled(&at.to_string(), &format!("{}\x1b[7m", input_style))?;
            let after: String = visible.iter().skip(cursor_col + 1).collect();
            renderer.write_styled(&after, &input_style)?;
            visible.len().max(cursor_col + 1)
        } else {
            let after: String = visible.iter().skip(cursor_col).collect();
            renderer.write_styled(&after, &input_style)?;
            visible.len()
        };

        if used < width {
            renderer.write_styled(&" ".repeat(width - used), &input_style)?;
        }

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        (10, 1)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn name(&self) -> &str {
        "TextInput"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalCapabilities;
    use crate::theme::Theme;

    fn focused() -> TextInput {
        let mut input = TextInput::new();
        input.on_focus();
        input
    }

    fn type_str(input: &mut TextInput, s: &str) {
        for c in s.chars() {
            input.handle_event(&Event::Key(Key::Char(c)));
        }
    }

    #[test]
    fn test_unfocused_ignores_input() {
        let mut input = TextInput::new();
        assert!(!input.handle_event(&Event::Key(Key::Char('a'))));
        assert!(input.is_empty());
    }

    #[test]
    fn test_insert_and_cursor() {
        let mut input = focused();
        type_str(&mut input, "héllo");
        assert_eq!(input.value(), "héllo");
        assert_eq!(input.cursor_position(), "héllo".len());
    }

    #[test]
    fn test_navigation() {
        let mut input = TextInput::new();
        input.set_value("hello world");

        input.move_to_start();
        assert_eq!(input.cursor_position(), 0);
        input.move_to_end();
        assert_eq!(input.cursor_position(), 11);
        input.move_left();
        assert_eq!(input.cursor_position(), 10);
        input.move_right();
        assert_eq!(input.cursor_position(), 11);
    }

    #[test]
    fn test_deletion() {
        let mut input = TextInput::new();
        input.set_value("hello");

        input.delete_char_before();
        assert_eq!(input.value(), "hell");
        input.move_to_start();
        input.delete_char_at();
        assert_eq!(input.value(), "ell");
    }

    #[test]
    fn test_word_editing() {
        let mut input = TextInput::new();
        input.set_value("hello world test");

        input.move_to_start();
        input.move_word_right();
        assert_eq!(input.cursor_position(), 6);
        input.move_word_right();
        assert_eq!(input.cursor_position(), 12);
        input.move_word_left();
        assert_eq!(input.cursor_position(), 6);

        input.move_to_end();
        input.delete_word_before();
        assert_eq!(input.value(), "hello world ");
    }

    #[test]
    fn test_keyboard_filter() {
        let mut input = focused();
        input.reset("", None, KeyboardHint::Numeric);

        type_str(&mut input, "4a2.");
        assert_eq!(input.value(), "42");

        input.handle_event(&Event::Paste("1x9\n".to_string()));
        assert_eq!(input.value(), "4219");
    }

    #[test]
    fn test_enter_and_esc_pass_through() {
        let mut input = focused();
        assert!(!input.handle_event(&Event::Key(Key::Enter)));
        assert!(!input.handle_event(&Event::Key(Key::Esc)));
        assert!(!input.handle_event(&Event::Key(Key::Tab)));
    }

    #[test]
    fn test_mask_and_reset() {
        let mut input = focused().with_mask(Some(MASK_CHAR));
        type_str(&mut input, "pw");
        assert_eq!(input.value(), "pw");
        assert_eq!(input.display_text(), "••");

        input.reset("abc", None, KeyboardHint::Default);
        assert_eq!(input.value(), "abc");
        assert_eq!(input.display_text(), "abc");
        assert_eq!(input.cursor_position(), 3);
    }

    #[test]
    fn test_render_masks_secret() {
        let (mut renderer, buffer) = Renderer::capture(20, 3);
        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme);

        let mut input = TextInput::new().with_mask(Some('*'));
        input.set_value("secret");
        input.render(&mut renderer, Rect::new(0, 0, 10, 1), &ctx).unwrap();
        renderer.flush().unwrap();

        let text = buffer.plain_text();
        assert!(text.contains("******"));
        assert!(!text.contains("secret"));
    }
}
