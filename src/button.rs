//! Dialog buttons and their activation handlers

use crate::stack::ManualClose;
use std::fmt;
use std::rc::Rc;

/// Button role; only `Cancel` affects behavior (backdrop and back dismissal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonRole {
    #[default]
    Default,
    Cancel,
    Destructive,
}

/// What a handler reported back after running
///
/// Handlers returning `()` produce `Default`. Handlers returning `bool` follow
/// the older convention where `false` keeps the dialog open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Nothing said; the default dismissal rules apply
    Default,
    /// Handler returned `true`
    Close,
    /// Handler returned `false`
    KeepOpen,
}

impl From<()> for PressOutcome {
    fn from(_: ()) -> Self {
        PressOutcome::Default
    }
}

impl From<bool> for PressOutcome {
    fn from(close: bool) -> Self {
        if close {
            PressOutcome::Close
        } else {
            PressOutcome::KeepOpen
        }
    }
}

/// Button activation handler
///
/// Receives the prompt text (prompt dialogs only) and a handle that removes
/// the dialog when called.
pub type OnActivate = Rc<dyn Fn(Option<&str>, &ManualClose) -> PressOutcome>;

/// One actionable control on a dialog
#[derive(Clone)]
pub struct ButtonSpec {
    pub label: String,
    pub role: ButtonRole,
    pub on_activate: Option<OnActivate>,
    /// The handler alone decides when the dialog closes
    pub prevent_auto_close: bool,
    /// Older spelling of `prevent_auto_close`: `false` suppresses auto-close
    pub closable: bool,
}

impl ButtonSpec {
    pub fn new(label: impl Into<String>) -> Self {
        ButtonSpec {
            label: label.into(),
            role: ButtonRole::Default,
            on_activate: None,
            prevent_auto_close: false,
            closable: true,
        }
    }

    pub fn cancel(label: impl Into<String>) -> Self {
        Self::new(label).role(ButtonRole::Cancel)
    }

    pub fn destructive(label: impl Into<String>) -> Self {
        Self::new(label).role(ButtonRole::Destructive)
    }

    pub fn role(mut self, role: ButtonRole) -> Self {
        self.role = role;
        self
    }

    /// Set the activation handler
    ///
    /// The closure may return `()` or `bool`; see [`PressOutcome`].
    pub fn on_press<F, R>(mut self, handler: F) -> Self
    where
        F: Fn(Option<&str>, &ManualClose) -> R + 'static,
        R: Into<PressOutcome>,
    {
        let wrapped = move |value: Option<&str>, close: &ManualClose| -> PressOutcome {
            handler(value, close).into()
        };
        self.on_activate = Some(Rc::new(wrapped));
        self
    }

    pub fn prevent_auto_close(mut self) -> Self {
        self.prevent_auto_close = true;
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn is_cancel(&self) -> bool {
        self.role == ButtonRole::Cancel
    }

    /// Either flag asks for manual close only
    pub fn suppresses_auto_close(&self) -> bool {
        self.prevent_auto_close || !self.closable
    }
}

impl fmt::Debug for ButtonSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonSpec")
            .field("label", &self.label)
            .field("role", &self.role)
            .field("has_handler", &self.on_activate.is_some())
            .field("prevent_auto_close", &self.prevent_auto_close)
            .field("closable", &self.closable)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_handler_return_conventions() {
        let unit = ButtonSpec::new("A").on_press(|_, _| {});
        let yes = ButtonSpec::new("B").on_press(|_, _| true);
        let no = ButtonSpec::new("C").on_press(|_, _| false);
        let close = ManualClose::noop();

        let call = |b: &ButtonSpec| (b.on_activate.as_ref().unwrap())(None, &close);
        assert_eq!(call(&unit), PressOutcome::Default);
        assert_eq!(call(&yes), PressOutcome::Close);
        assert_eq!(call(&no), PressOutcome::KeepOpen);
    }

    #[test]
    fn test_handler_sees_value() {
        let seen = Rc::new(Cell::new(0usize));
        let seen2 = seen.clone();
        let button = ButtonSpec::new("OK").on_press(move |value: Option<&str>, _: &ManualClose| {
            seen2.set(value.map(str::len).unwrap_or(0));
        });

        (button.on_activate.unwrap())(Some("abc"), &ManualClose::noop());
        assert_eq!(seen.get(), 3);
    }

    #[test]
    fn test_auto_close_flags() {
        assert!(!ButtonSpec::new("OK").suppresses_auto_close());
        assert!(ButtonSpec::new("OK").prevent_auto_close().suppresses_auto_close());
        assert!(ButtonSpec::new("OK").closable(false).suppresses_auto_close());
        assert!(ButtonSpec::cancel("Cancel").is_cancel());
        assert!(!ButtonSpec::destructive("Delete").is_cancel());
    }
}
