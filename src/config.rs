//! Service-wide defaults applied while normalizing alert requests

use crate::request::{ButtonLayout, PromptKind};

/// Defaults for labels and presentation flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDefaults {
    /// Label of the acknowledgement button synthesized for bare alerts
    pub ok_label: String,
    /// Label of the cancel button synthesized for prompts
    pub cancel_label: String,
    pub prompt_kind: PromptKind,
    pub close_on_touch_outside: bool,
    pub show_close_icon: bool,
    pub button_layout: ButtonLayout,
}

impl AlertDefaults {
    pub fn new() -> Self {
        AlertDefaults {
            ok_label: "OK".to_string(),
            cancel_label: "Cancel".to_string(),
            prompt_kind: PromptKind::PlainText,
            close_on_touch_outside: true,
            show_close_icon: true,
            button_layout: ButtonLayout::Row,
        }
    }

    /// Defaults adjusted by `MKALERT_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut defaults = Self::new();

        if let Some(label) = lookup("MKALERT_OK_LABEL").filter(|s| !s.is_empty()) {
            defaults.ok_label = label;
        }
        if let Some(label) = lookup("MKALERT_CANCEL_LABEL").filter(|s| !s.is_empty()) {
            defaults.cancel_label = label;
        }
        if lookup("MKALERT_NO_CLOSE_ICON").is_some() {
            defaults.show_close_icon = false;
        }
        if lookup("MKALERT_NO_BACKDROP_DISMISS").is_some() {
            defaults.close_on_touch_outside = false;
        }
        match lookup("MKALERT_BUTTON_LAYOUT").as_deref() {
            Some("column") => defaults.button_layout = ButtonLayout::Column,
            Some("row") => defaults.button_layout = ButtonLayout::Row,
            Some(other) => {
                tracing::warn!(value = other, "ignoring unknown MKALERT_BUTTON_LAYOUT")
            }
            None => {}
        }

        defaults
    }

    pub fn with_ok_label(mut self, label: impl Into<String>) -> Self {
        self.ok_label = label.into();
        self
    }

    pub fn with_cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = label.into();
        self
    }

    pub fn with_prompt_kind(mut self, kind: PromptKind) -> Self {
        self.prompt_kind = kind;
        self
    }

    pub fn with_close_on_touch_outside(mut self, close: bool) -> Self {
        self.close_on_touch_outside = close;
        self
    }

    pub fn with_close_icon(mut self, show: bool) -> Self {
        self.show_close_icon = show;
        self
    }

    pub fn with_button_layout(mut self, layout: ButtonLayout) -> Self {
        self.button_layout = layout;
        self
    }
}

impl Default for AlertDefaults {
    fn default() -> Self {
        Self::new()
    }
}
