//! Dismissal rules - what happens when a button is pressed or the dialog is
//! dismissed from outside
//!
//! A press runs in a fixed order:
//!
//! 1. A [`ManualClose`] bound to the active request's id is prepared.
//! 2. A button without a handler removes the request.
//! 3. Otherwise the handler runs with the prompt text (prompts only) and the
//!    close handle.
//! 4. `prevent_auto_close` (or `closable(false)`) leaves the request alone.
//! 5. A handler returning `false` leaves the request alone.
//! 6. Otherwise the request is removed.
//!
//! Every removal goes through the request's id, never "pop the top", so a
//! handler that raises a follow-up alert does not lose it.

use crate::button::PressOutcome;
use crate::request::AlertId;
use crate::stack::{AlertStack, ManualClose};

/// Result of pressing a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing was showing
    NoActive,
    /// The active request has no button at that index
    NoButton,
    /// The request was removed after the press
    Closed(AlertId),
    /// Auto-close was suppressed; the handler owns the request's fate
    KeptOpen(AlertId),
}

/// Where an outside dismissal came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissSource {
    /// Click outside the card
    Backdrop,
    /// Escape / back navigation
    BackNavigation,
    /// The × in the card corner
    CloseIcon,
}

impl DismissSource {
    /// Backdrop and back navigation honor `close_on_touch_outside`.
    pub fn is_gated(&self) -> bool {
        !matches!(self, DismissSource::CloseIcon)
    }
}

/// Press button `index` of the active request.
///
/// `value` is the current prompt text; it is only forwarded to the handler
/// when the request is a prompt.
pub fn press(stack: &AlertStack, index: usize, value: Option<&str>) -> Resolution {
    let Some(request) = stack.active() else {
        return Resolution::NoActive;
    };
    let Some(button) = request.buttons.get(index) else {
        return Resolution::NoButton;
    };
    let id = request.id;
    let close = stack.manual_close(id);

    let Some(handler) = button.on_activate.clone() else {
        close.close();
        return Resolution::Closed(id);
    };

    let value = if request.is_prompt {
        Some(value.unwrap_or(""))
    } else {
        None
    };
    let outcome = handler(value, &close);

    if button.suppresses_auto_close() {
        tracing::debug!(%id, label = %button.label, "auto-close suppressed by flag");
        return Resolution::KeptOpen(id);
    }
    if outcome == PressOutcome::KeepOpen {
        tracing::debug!(%id, label = %button.label, "auto-close suppressed by handler");
        return Resolution::KeptOpen(id);
    }

    close.close();
    Resolution::Closed(id)
}

/// Dismiss the active request from outside its buttons.
///
/// The first cancel-role button's handler runs with no value and a close
/// handle bound to nothing; the request is then removed regardless of what
/// the handler returned. Returns `None` when nothing was dismissed.
pub fn dismiss(stack: &AlertStack, source: DismissSource) -> Option<AlertId> {
    let request = stack.active()?;
    if source.is_gated() && !request.close_on_touch_outside {
        tracing::trace!(id = %request.id, ?source, "outside dismissal disabled");
        return None;
    }

    let handler = request
        .cancel_button()
        .and_then(|idx| request.buttons[idx].on_activate.clone());
    if let Some(handler) = handler {
        handler(None, &ManualClose::noop());
    }

    stack.close_by_id(request.id);
    tracing::debug!(id = %request.id, ?source, "alert dismissed");
    Some(request.id)
}
