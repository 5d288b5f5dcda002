//! Alert requests - the normalized description of one dialog
//!
//! A request is built once by [`AlertService`](crate::service::AlertService)
//! and never mutated afterwards. The text typed into a prompt lives in the
//! view, not here.

use crate::button::ButtonSpec;
use crate::style::Style;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for unique alert IDs.
static ALERT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier of an alert request, unique within the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlertId(u64);

impl AlertId {
    /// Allocate the next unique id.
    pub(crate) fn next() -> Self {
        Self(ALERT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alert-{}", self.0)
    }
}

/// Visual flavor of an alert; selects the palette and default icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlertKind {
    #[default]
    Default,
    Success,
    Error,
    Warning,
    Info,
}

impl AlertKind {
    pub const ALL: [AlertKind; 5] = [
        AlertKind::Default,
        AlertKind::Success,
        AlertKind::Error,
        AlertKind::Warning,
        AlertKind::Info,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AlertKind::Default => "default",
            AlertKind::Success => "success",
            AlertKind::Error => "error",
            AlertKind::Warning => "warning",
            AlertKind::Info => "info",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            AlertKind::Default => 0,
            AlertKind::Success => 1,
            AlertKind::Error => 2,
            AlertKind::Warning => 3,
            AlertKind::Info => 4,
        }
    }
}

/// Input masking for prompt dialogs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptKind {
    Default,
    #[default]
    PlainText,
    SecureText,
    LoginPassword,
}

impl PromptKind {
    /// Whether typed characters are hidden
    pub fn is_secure(&self) -> bool {
        matches!(self, PromptKind::SecureText | PromptKind::LoginPassword)
    }
}

/// Which characters a prompt field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyboardHint {
    #[default]
    Default,
    Numeric,
    Decimal,
    Phone,
    Email,
    Url,
}

impl KeyboardHint {
    pub fn accepts(&self, c: char) -> bool {
        match self {
            KeyboardHint::Default => !c.is_control(),
            KeyboardHint::Numeric => c.is_ascii_digit(),
            KeyboardHint::Decimal => c.is_ascii_digit() || c == '.' || c == ',',
            KeyboardHint::Phone => c.is_ascii_digit() || "+-() #*".contains(c),
            KeyboardHint::Email | KeyboardHint::Url => c.is_ascii_graphic(),
        }
    }
}

/// Button arrangement hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonLayout {
    #[default]
    Row,
    Column,
}

/// Free-form visual overrides, carried verbatim to the view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverrides {
    pub container: Option<Style>,
    pub title: Option<Style>,
    pub message: Option<Style>,
}

/// Presentation overrides accepted by `alert`/`prompt`
///
/// Every field left as `None` falls back to the service defaults. Title,
/// message, buttons, kind and the prompt flag are not part of the options and
/// cannot be overridden through them.
#[derive(Debug, Clone, Default)]
pub struct AlertOptions {
    pub prompt_kind: Option<PromptKind>,
    pub default_value: Option<String>,
    pub keyboard: Option<KeyboardHint>,
    pub close_on_touch_outside: Option<bool>,
    pub show_close_icon: Option<bool>,
    pub button_layout: Option<ButtonLayout>,
    pub styles: StyleOverrides,
    /// Replaces the palette glyph shown above the title
    pub icon: Option<String>,
}

impl AlertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt_kind(mut self, kind: PromptKind) -> Self {
        self.prompt_kind = Some(kind);
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn keyboard(mut self, hint: KeyboardHint) -> Self {
        self.keyboard = Some(hint);
        self
    }

    pub fn close_on_touch_outside(mut self, close: bool) -> Self {
        self.close_on_touch_outside = Some(close);
        self
    }

    pub fn show_close_icon(mut self, show: bool) -> Self {
        self.show_close_icon = Some(show);
        self
    }

    pub fn button_layout(mut self, layout: ButtonLayout) -> Self {
        self.button_layout = Some(layout);
        self
    }

    pub fn container_style(mut self, style: Style) -> Self {
        self.styles.container = Some(style);
        self
    }

    pub fn title_style(mut self, style: Style) -> Self {
        self.styles.title = Some(style);
        self
    }

    pub fn message_style(mut self, style: Style) -> Self {
        self.styles.message = Some(style);
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// One pending dialog
#[derive(Debug, Clone)]
pub struct AlertRequest {
    pub id: AlertId,
    pub title: Option<String>,
    pub message: Option<String>,
    /// Never empty for requests built by the service
    pub buttons: Vec<ButtonSpec>,
    pub kind: AlertKind,
    pub is_prompt: bool,
    pub prompt_kind: PromptKind,
    /// Initial text field contents, restored each time the request becomes active
    pub default_value: String,
    pub keyboard: KeyboardHint,
    pub close_on_touch_outside: bool,
    pub show_close_icon: bool,
    pub button_layout: ButtonLayout,
    pub styles: StyleOverrides,
    pub icon: Option<String>,
}

impl AlertRequest {
    /// Index of the first cancel-role button
    pub fn cancel_button(&self) -> Option<usize> {
        self.buttons.iter().position(ButtonSpec::is_cancel)
    }

    /// Buttons go in a column when asked to, or when more than two won't fit a row
    pub fn stacks_buttons(&self) -> bool {
        self.button_layout == ButtonLayout::Column || self.buttons.len() > 2
    }

    /// Minimal single-button request for unit tests
    #[cfg(test)]
    pub(crate) fn sample(title: &str) -> Self {
        AlertRequest {
            id: AlertId::next(),
            title: Some(title.to_string()),
            message: None,
            buttons: vec![ButtonSpec::new("OK")],
            kind: AlertKind::Default,
            is_prompt: false,
            prompt_kind: PromptKind::PlainText,
            default_value: String::new(),
            keyboard: KeyboardHint::Default,
            close_on_touch_outside: true,
            show_close_icon: true,
            button_layout: ButtonLayout::Row,
            styles: StyleOverrides::default(),
            icon: None,
        }
    }
}
