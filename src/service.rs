//! Alert service - the call surface applications use to raise dialogs
//!
//! `AlertService` turns loose call shapes (title, message, optional buttons,
//! options) into a normalized [`AlertRequest`] and hands it to whichever
//! [`AlertHost`] is attached. With no host attached every call is silently
//! dropped: alerts are often raised from error paths and must never fail.
//!
//! The service is an explicit context object rather than a process global.
//! Clone it freely; clones share the same host slot, so button handlers can
//! capture a clone to raise follow-up alerts.

use crate::button::ButtonSpec;
use crate::config::AlertDefaults;
use crate::request::{
    AlertId, AlertKind, AlertOptions, AlertRequest, KeyboardHint, PromptKind,
};
use crate::stack::AlertStack;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Receiver of alert requests, normally the mounted alert surface
pub trait AlertHost {
    /// Push a request on top of everything pending.
    fn show(&self, request: AlertRequest);

    /// Remove whatever is on top.
    fn close(&self);

    /// Remove everything.
    fn close_all(&self);
}

impl AlertHost for AlertStack {
    fn show(&self, request: AlertRequest) {
        AlertStack::show(self, request);
    }

    fn close(&self) {
        AlertStack::close(self);
    }

    fn close_all(&self) {
        AlertStack::close_all(self);
    }
}

/// How a prompt reports back
pub enum Responder {
    /// Called with the entered text when OK is pressed; buttons become Cancel + OK
    Callback(Rc<dyn Fn(&str)>),
    /// Buttons used as given
    Buttons(Vec<ButtonSpec>),
}

impl Responder {
    pub fn callback(f: impl Fn(&str) + 'static) -> Self {
        Responder::Callback(Rc::new(f))
    }
}

impl From<Vec<ButtonSpec>> for Responder {
    fn from(buttons: Vec<ButtonSpec>) -> Self {
        Responder::Buttons(buttons)
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Responder::Callback(_) => f.write_str("Responder::Callback(..)"),
            Responder::Buttons(b) => f.debug_tuple("Responder::Buttons").field(b).finish(),
        }
    }
}

#[derive(Default)]
struct ServiceInner {
    host: RefCell<Option<Rc<dyn AlertHost>>>,
    defaults: AlertDefaults,
}

/// Alert call surface with a single attachable host slot
#[derive(Clone, Default)]
pub struct AlertService {
    inner: Rc<ServiceInner>,
}

impl AlertService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: AlertDefaults) -> Self {
        AlertService {
            inner: Rc::new(ServiceInner {
                host: RefCell::new(None),
                defaults,
            }),
        }
    }

    pub fn defaults(&self) -> &AlertDefaults {
        &self.inner.defaults
    }

    // --- Host Registration ---

    /// Attach a host; a previously attached host is replaced.
    pub fn attach(&self, host: Rc<dyn AlertHost>) {
        let replaced = self.inner.host.borrow_mut().replace(host).is_some();
        tracing::debug!(replaced, "alert host attached");
    }

    /// Detach whatever host is attached.
    pub fn detach(&self) -> bool {
        let had_host = self.inner.host.borrow_mut().take().is_some();
        tracing::debug!(had_host, "alert host detached");
        had_host
    }

    /// Detach only if `host` is the one currently attached.
    ///
    /// Lets a surface unmount without evicting a newer surface that replaced it.
    pub fn detach_host(&self, host: &Rc<dyn AlertHost>) -> bool {
        let mut slot = self.inner.host.borrow_mut();
        let matches = slot
            .as_ref()
            .is_some_and(|current| std::ptr::addr_eq(Rc::as_ptr(current), Rc::as_ptr(host)));
        if matches {
            *slot = None;
            tracing::debug!("alert host detached");
        }
        matches
    }

    pub fn is_attached(&self) -> bool {
        self.inner.host.borrow().is_some()
    }

    fn host(&self) -> Option<Rc<dyn AlertHost>> {
        self.inner.host.borrow().clone()
    }

    fn deliver(&self, host: Rc<dyn AlertHost>, request: AlertRequest) -> AlertId {
        let id = request.id;
        host.show(request);
        id
    }

    // --- Requests ---

    /// Show a non-prompt alert.
    ///
    /// With no buttons a single acknowledgement button is added. Returns the
    /// new request's id, or `None` when no host is attached.
    pub fn alert(
        &self,
        title: Option<&str>,
        message: Option<&str>,
        buttons: Vec<ButtonSpec>,
        options: AlertOptions,
        kind: AlertKind,
    ) -> Option<AlertId> {
        let Some(host) = self.host() else {
            tracing::trace!(?title, "alert dropped, no host attached");
            return None;
        };

        let defaults = &self.inner.defaults;
        let buttons = if buttons.is_empty() {
            vec![ButtonSpec::new(defaults.ok_label.clone())]
        } else {
            buttons
        };

        let request = self.normalize(
            title,
            message,
            buttons,
            kind,
            false,
            options,
            (defaults.prompt_kind, String::new(), KeyboardHint::Default),
        );
        Some(self.deliver(host, request))
    }

    /// Show a prompt with a single-line text field.
    ///
    /// `options` fields that are set win over `prompt_kind`, `default_value`
    /// and `keyboard`.
    #[allow(clippy::too_many_arguments)] // Positional shape shared with `alert`
    pub fn prompt(
        &self,
        title: Option<&str>,
        message: Option<&str>,
        responder: Option<Responder>,
        prompt_kind: PromptKind,
        default_value: &str,
        keyboard: KeyboardHint,
        options: AlertOptions,
    ) -> Option<AlertId> {
        let Some(host) = self.host() else {
            tracing::trace!(?title, "prompt dropped, no host attached");
            return None;
        };

        let buttons = match responder {
            Some(Responder::Callback(callback)) => {
                vec![
                    self.cancel_button(),
                    ButtonSpec::new(self.inner.defaults.ok_label.clone())
                        .on_press(move |value, _| callback(value.unwrap_or(""))),
                ]
            }
            Some(Responder::Buttons(buttons)) if !buttons.is_empty() => buttons,
            Some(Responder::Buttons(_)) | None => vec![
                self.cancel_button(),
                ButtonSpec::new(self.inner.defaults.ok_label.clone()),
            ],
        };

        let request = self.normalize(
            title,
            message,
            buttons,
            AlertKind::Default,
            true,
            options,
            (prompt_kind, default_value.to_string(), keyboard),
        );
        Some(self.deliver(host, request))
    }

    pub fn success(
        &self,
        title: Option<&str>,
        message: Option<&str>,
        buttons: Vec<ButtonSpec>,
        options: AlertOptions,
    ) -> Option<AlertId> {
        self.alert(title, message, buttons, options, AlertKind::Success)
    }

    pub fn error(
        &self,
        title: Option<&str>,
        message: Option<&str>,
        buttons: Vec<ButtonSpec>,
        options: AlertOptions,
    ) -> Option<AlertId> {
        self.alert(title, message, buttons, options, AlertKind::Error)
    }

    pub fn warning(
        &self,
        title: Option<&str>,
        message: Option<&str>,
        buttons: Vec<ButtonSpec>,
        options: AlertOptions,
    ) -> Option<AlertId> {
        self.alert(title, message, buttons, options, AlertKind::Warning)
    }

    pub fn info(
        &self,
        title: Option<&str>,
        message: Option<&str>,
        buttons: Vec<ButtonSpec>,
        options: AlertOptions,
    ) -> Option<AlertId> {
        self.alert(title, message, buttons, options, AlertKind::Info)
    }

    /// Remove the top-most alert, if any host and alert exist.
    pub fn hide(&self) {
        match self.host() {
            Some(host) => host.close(),
            None => tracing::trace!("hide ignored, no host attached"),
        }
    }

    /// Remove every pending alert.
    pub fn hide_all(&self) {
        if let Some(host) = self.host() {
            host.close_all();
        }
    }

    fn cancel_button(&self) -> ButtonSpec {
        ButtonSpec::cancel(self.inner.defaults.cancel_label.clone())
    }

    #[allow(clippy::too_many_arguments)]
    fn normalize(
        &self,
        title: Option<&str>,
        message: Option<&str>,
        buttons: Vec<ButtonSpec>,
        kind: AlertKind,
        is_prompt: bool,
        options: AlertOptions,
        (prompt_kind, default_value, keyboard): (PromptKind, String, KeyboardHint),
    ) -> AlertRequest {
        let defaults = &self.inner.defaults;
        AlertRequest {
            id: AlertId::next(),
            title: title.map(str::to_string),
            message: message.map(str::to_string),
            buttons,
            kind,
            is_prompt,
            prompt_kind: options.prompt_kind.unwrap_or(prompt_kind),
            default_value: options.default_value.unwrap_or(default_value),
            keyboard: options.keyboard.unwrap_or(keyboard),
            close_on_touch_outside: options
                .close_on_touch_outside
                .unwrap_or(defaults.close_on_touch_outside),
            show_close_icon: options.show_close_icon.unwrap_or(defaults.show_close_icon),
            button_layout: options.button_layout.unwrap_or(defaults.button_layout),
            styles: options.styles,
            icon: options.icon,
        }
    }
}

impl fmt::Debug for AlertService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertService")
            .field("attached", &self.is_attached())
            .field("defaults", &self.inner.defaults)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::ButtonRole;
    use crate::request::ButtonLayout;
    use crate::stack::ManualClose;
    use crate::style::Style;
    use crate::theme::Color;
    use std::cell::RefCell;

    fn attached() -> (AlertService, AlertStack) {
        let service = AlertService::new();
        let stack = AlertStack::new();
        service.attach(Rc::new(stack.clone()));
        (service, stack)
    }

    fn labels(request: &AlertRequest) -> Vec<&str> {
        request.buttons.iter().map(|b| b.label.as_str()).collect()
    }

    #[test]
    fn test_dropped_without_host() {
        let service = AlertService::new();
        assert!(!service.is_attached());
        assert_eq!(service.alert(Some("T"), None, vec![], AlertOptions::new(), AlertKind::Default), None);
        assert_eq!(
            service.prompt(None, None, None, PromptKind::PlainText, "", KeyboardHint::Default, AlertOptions::new()),
            None
        );
        service.hide();
        service.hide_all();
    }

    #[test]
    fn test_alert_synthesizes_ok() {
        let (service, stack) = attached();
        let id = service
            .alert(Some("T"), Some("M"), vec![], AlertOptions::new(), AlertKind::Default)
            .unwrap();

        let active = stack.active().unwrap();
        assert_eq!(active.id, id);
        assert_eq!(active.title.as_deref(), Some("T"));
        assert_eq!(active.message.as_deref(), Some("M"));
        assert_eq!(labels(&active), vec!["OK"]);
        assert!(active.buttons[0].on_activate.is_none());
        assert!(!active.is_prompt);
        assert!(active.close_on_touch_outside);
        assert!(active.show_close_icon);
    }

    #[test]
    fn test_missing_title_and_message_stay_absent() {
        let (service, stack) = attached();
        service.alert(None, None, vec![], AlertOptions::new(), AlertKind::Default);

        let active = stack.active().unwrap();
        assert!(active.title.is_none());
        assert!(active.message.is_none());
    }

    #[test]
    fn test_kind_wrappers() {
        let (service, stack) = attached();
        service.success(Some("s"), None, vec![], AlertOptions::new());
        assert_eq!(stack.active().unwrap().kind, AlertKind::Success);
        service.error(Some("e"), None, vec![], AlertOptions::new());
        assert_eq!(stack.active().unwrap().kind, AlertKind::Error);
        service.warning(Some("w"), None, vec![], AlertOptions::new());
        assert_eq!(stack.active().unwrap().kind, AlertKind::Warning);
        service.info(Some("i"), None, vec![], AlertOptions::new());
        assert_eq!(stack.active().unwrap().kind, AlertKind::Info);
        assert_eq!(stack.depth(), 4);
    }

    #[test]
    fn test_options_override_defaults() {
        let (service, stack) = attached();
        let opts = AlertOptions::new()
            .close_on_touch_outside(false)
            .show_close_icon(false)
            .button_layout(ButtonLayout::Column)
            .title_style(Style::new().color(Color::black()))
            .icon("?");
        service.alert(Some("T"), None, vec![ButtonSpec::new("Yes")], opts, AlertKind::Warning);

        let active = stack.active().unwrap();
        assert!(!active.close_on_touch_outside);
        assert!(!active.show_close_icon);
        assert_eq!(active.button_layout, ButtonLayout::Column);
        assert_eq!(active.styles.title, Some(Style::new().color(Color::black())));
        assert!(active.styles.container.is_none());
        assert_eq!(active.icon.as_deref(), Some("?"));
        assert_eq!(labels(&active), vec!["Yes"]);
        assert!(!active.is_prompt);
    }

    #[test]
    fn test_prompt_with_callback() {
        let (service, stack) = attached();
        let got = Rc::new(RefCell::new(None::<String>));
        let sink = got.clone();

        service.prompt(
            Some("Age"),
            Some("How old are you?"),
            Some(Responder::callback(move |text| *sink.borrow_mut() = Some(text.to_string()))),
            PromptKind::PlainText,
            "18",
            KeyboardHint::Numeric,
            AlertOptions::new(),
        );

        let active = stack.active().unwrap();
        assert!(active.is_prompt);
        assert_eq!(active.kind, AlertKind::Default);
        assert_eq!(active.default_value, "18");
        assert_eq!(active.keyboard, KeyboardHint::Numeric);
        assert_eq!(labels(&active), vec!["Cancel", "OK"]);
        assert_eq!(active.buttons[0].role, ButtonRole::Cancel);

        let ok = active.buttons[1].on_activate.clone().unwrap();
        ok(None, &ManualClose::noop());
        assert_eq!(got.borrow().as_deref(), Some(""));
        ok(Some("42"), &ManualClose::noop());
        assert_eq!(got.borrow().as_deref(), Some("42"));
    }

    #[test]
    fn test_prompt_button_shapes() {
        let (service, stack) = attached();

        service.prompt(None, None, None, PromptKind::SecureText, "", KeyboardHint::Default, AlertOptions::new());
        assert_eq!(labels(&stack.active().unwrap()), vec!["Cancel", "OK"]);
        assert!(stack.active().unwrap().prompt_kind.is_secure());

        let custom = vec![ButtonSpec::new("A"), ButtonSpec::new("B"), ButtonSpec::new("C")];
        service.prompt(None, None, Some(custom.into()), PromptKind::PlainText, "", KeyboardHint::Default, AlertOptions::new());
        assert_eq!(labels(&stack.active().unwrap()), vec!["A", "B", "C"]);

        service.prompt(None, None, Some(Responder::Buttons(vec![])), PromptKind::PlainText, "", KeyboardHint::Default, AlertOptions::new());
        assert_eq!(labels(&stack.active().unwrap()), vec!["Cancel", "OK"]);
    }

    #[test]
    fn test_prompt_options_win() {
        let (service, stack) = attached();
        let opts = AlertOptions::new()
            .prompt_kind(PromptKind::LoginPassword)
            .default_value("from options")
            .keyboard(KeyboardHint::Email);
        service.prompt(None, None, None, PromptKind::PlainText, "from args", KeyboardHint::Default, opts);

        let active = stack.active().unwrap();
        assert_eq!(active.prompt_kind, PromptKind::LoginPassword);
        assert_eq!(active.default_value, "from options");
        assert_eq!(active.keyboard, KeyboardHint::Email);
    }

    #[test]
    fn test_custom_default_labels() {
        let service = AlertService::with_defaults(
            AlertDefaults::new().with_ok_label("Vale").with_cancel_label("Atrás"),
        );
        let stack = AlertStack::new();
        service.attach(Rc::new(stack.clone()));

        service.alert(None, None, vec![], AlertOptions::new(), AlertKind::Default);
        assert_eq!(labels(&stack.active().unwrap()), vec!["Vale"]);

        service.prompt(None, None, None, PromptKind::PlainText, "", KeyboardHint::Default, AlertOptions::new());
        assert_eq!(labels(&stack.active().unwrap()), vec!["Atrás", "Vale"]);
    }

    #[test]
    fn test_hide_pops_top() {
        let (service, stack) = attached();
        let a = service.alert(Some("a"), None, vec![], AlertOptions::new(), AlertKind::Default);
        service.alert(Some("b"), None, vec![], AlertOptions::new(), AlertKind::Default);

        service.hide();
        assert_eq!(stack.active_id(), a);
        service.hide();
        service.hide();
        assert!(stack.is_empty());

        service.alert(Some("c"), None, vec![], AlertOptions::new(), AlertKind::Default);
        service.alert(Some("d"), None, vec![], AlertOptions::new(), AlertKind::Default);
        service.hide_all();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_last_attached_host_wins() {
        let service = AlertService::new();
        let first = AlertStack::new();
        let second = AlertStack::new();
        let first_host: Rc<dyn AlertHost> = Rc::new(first.clone());
        let second_host: Rc<dyn AlertHost> = Rc::new(second.clone());

        service.attach(first_host.clone());
        service.attach(second_host.clone());
        service.alert(Some("x"), None, vec![], AlertOptions::new(), AlertKind::Default);
        assert!(first.is_empty());
        assert_eq!(second.depth(), 1);

        // A stale surface unmounting leaves the newer one attached
        assert!(!service.detach_host(&first_host));
        assert!(service.is_attached());
        assert!(service.detach_host(&second_host));
        assert!(!service.is_attached());
        assert!(!service.detach());
    }

    #[test]
    fn test_clones_share_host_slot() {
        let (service, stack) = attached();
        let clone = service.clone();
        clone.info(Some("from clone"), None, vec![], AlertOptions::new());
        assert_eq!(stack.depth(), 1);

        clone.detach();
        assert!(!service.is_attached());
    }
}
