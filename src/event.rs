//! Event system - keyboard, mouse, and terminal events

use anyhow::{Context, Result};
use std::time::Duration;

/// Keyboard key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Alt(char),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    BackTab,
    Backspace,
    Delete,
    Enter,
    Tab,
    Esc,
    Null,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Mouse event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEvent {
    Press(MouseButton, u16, u16), // button, col, row
    Release(u16, u16),            // col, row
    Moved(u16, u16),              // col, row (hover or drag)
    ScrollUp(u16, u16),
    ScrollDown(u16, u16),
}

/// UI events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    Mouse(MouseEvent),
    /// Terminal resized (new cols, new rows)
    Resize(u16, u16),
    FocusGained,
    FocusLost,
    /// Bracketed paste
    Paste(String),
}

/// Event handler trait for components
pub trait EventHandler {
    /// Handle an event, return true if consumed (stops propagation)
    fn handle_event(&mut self, _event: &Event) -> bool {
        false
    }

    /// Called when component gains focus
    fn on_focus(&mut self) {}

    /// Called when component loses focus
    fn on_blur(&mut self) {}
}

/// Raw-mode terminal input, converted from crossterm events
pub struct EventPoller {
    mouse: bool,
}

impl EventPoller {
    /// Enter raw mode; mouse capture is enabled when `mouse` is set
    pub fn new(mouse: bool) -> Result<Self> {
        crossterm::terminal::enable_raw_mode().context("failed to enable raw mode")?;

        // Mouse and paste are best effort; a terminal without them still works by keyboard
        if mouse {
            let _ = crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture);
        }
        let _ = crossterm::execute!(std::io::stdout(), crossterm::event::EnableBracketedPaste);

        Ok(EventPoller { mouse })
    }

    /// Wait up to `timeout` for the next event
    ///
    /// Returns `None` on timeout or when the raw event has no counterpart
    /// (key releases, for instance).
    pub fn poll(&self, timeout: Duration) -> Result<Option<Event>> {
        if crossterm::event::poll(timeout)? {
            let event = crossterm::event::read()?;
            Ok(convert_crossterm_event(event))
        } else {
            Ok(None)
        }
    }

    /// Block until the next convertible event
    pub fn read(&self) -> Result<Event> {
        loop {
            if let Some(event) = convert_crossterm_event(crossterm::event::read()?) {
                return Ok(event);
            }
        }
    }
}

impl Drop for EventPoller {
    fn drop(&mut self) {
        if self.mouse {
            let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
        }
        let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableBracketedPaste);
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

/// Convert crossterm event to our Event type
fn convert_crossterm_event(event: crossterm::event::Event) -> Option<Event> {
    use crossterm::event::{Event as CEvent, KeyEventKind, MouseEventKind};

    let converted = match event {
        CEvent::Key(key) if key.kind == KeyEventKind::Release => return None,
        CEvent::Key(key) => Event::Key(convert_key(key.code, key.modifiers)),
        CEvent::Mouse(me) => {
            let (col, row) = (me.column, me.row);
            let mouse_event = match me.kind {
                MouseEventKind::Down(btn) => MouseEvent::Press(convert_button(btn), col, row),
                MouseEventKind::Up(_) => MouseEvent::Release(col, row),
                MouseEventKind::Drag(_) | MouseEventKind::Moved => MouseEvent::Moved(col, row),
                MouseEventKind::ScrollUp => MouseEvent::ScrollUp(col, row),
                MouseEventKind::ScrollDown => MouseEvent::ScrollDown(col, row),
                MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => return None,
            };
            Event::Mouse(mouse_event)
        }
        CEvent::Resize(cols, rows) => Event::Resize(cols, rows),
        CEvent::FocusGained => Event::FocusGained,
        CEvent::FocusLost => Event::FocusLost,
        CEvent::Paste(data) => Event::Paste(data),
    };
    Some(converted)
}

fn convert_button(btn: crossterm::event::MouseButton) -> MouseButton {
    match btn {
        crossterm::event::MouseButton::Left => MouseButton::Left,
        crossterm::event::MouseButton::Right => MouseButton::Right,
        crossterm::event::MouseButton::Middle => MouseButton::Middle,
    }
}

/// Convert crossterm key code to our Key type
fn convert_key(code: crossterm::event::KeyCode, mods: crossterm::event::KeyModifiers) -> Key {
    use crossterm::event::{KeyCode, KeyModifiers};

    if let KeyCode::Char(c) = code {
        if mods.contains(KeyModifiers::CONTROL) {
            return Key::Ctrl(c);
        }
        if mods.contains(KeyModifiers::ALT) {
            return Key::Alt(c);
        }
    }

    match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Tab if mods.contains(KeyModifiers::SHIFT) => Key::BackTab,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        _ => Key::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{
        Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers,
        MouseEvent as CMouseEvent, MouseEventKind,
    };

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> CEvent {
        CEvent::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_key_conversion() {
        assert_eq!(convert_key(KeyCode::Char('a'), KeyModifiers::NONE), Key::Char('a'));
        assert_eq!(convert_key(KeyCode::Char('c'), KeyModifiers::CONTROL), Key::Ctrl('c'));
        assert_eq!(convert_key(KeyCode::Char('x'), KeyModifiers::ALT), Key::Alt('x'));
        assert_eq!(convert_key(KeyCode::Tab, KeyModifiers::SHIFT), Key::BackTab);
        assert_eq!(convert_key(KeyCode::F(5), KeyModifiers::NONE), Key::Null);
    }

    #[test]
    fn test_key_release_is_skipped() {
        let press = key(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Press);
        let release = key(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release);

        assert_eq!(convert_crossterm_event(press), Some(Event::Key(Key::Enter)));
        assert_eq!(convert_crossterm_event(release), None);
    }

    #[test]
    fn test_mouse_conversion() {
        let click = CEvent::Mouse(CMouseEvent {
            kind: MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            convert_crossterm_event(click),
            Some(Event::Mouse(MouseEvent::Press(MouseButton::Left, 4, 7)))
        );
        assert_eq!(convert_crossterm_event(CEvent::Resize(80, 24)), Some(Event::Resize(80, 24)));
    }
}
