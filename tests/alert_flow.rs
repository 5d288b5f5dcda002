//! End-to-end alert flows: service calls in, rendered frames and handler
//! calls out.

use mkalert::{
    AlertKind, AlertOptions, AlertService, AlertView, ButtonSpec, CaptureBuffer, Component,
    DismissSource, Event, EventHandler, Key, KeyboardHint, ManualClose, PromptKind, Rect,
    RenderContext, Renderer, Resolution, Responder, TerminalCapabilities, Theme,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct Harness {
    service: AlertService,
    view: AlertView,
    theme: Theme,
}

impl Harness {
    fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();

        let service = AlertService::new();
        let mut view = AlertView::new(service.clone());
        view.on_mount();
        Harness {
            service,
            view,
            theme: Theme::new(TerminalCapabilities::basic()),
        }
    }

    fn key(&mut self, key: Key) -> bool {
        self.view.handle_event(&Event::Key(key))
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.key(Key::Char(c));
        }
    }

    fn frame(&mut self) -> String {
        let (mut renderer, buffer): (Renderer, CaptureBuffer) = Renderer::capture(80, 24);
        let ctx = RenderContext::new(&self.theme);
        self.view
            .render(&mut renderer, Rect::fullscreen(80, 24), &ctx)
            .unwrap();
        renderer.flush().unwrap();
        buffer.plain_text()
    }

    fn depth(&self) -> usize {
        self.view.stack().depth()
    }
}

#[test]
fn test_newest_alert_is_drawn() {
    let mut h = Harness::new();
    h.service.info(Some("First"), Some("bottom"), vec![], AlertOptions::new());
    h.service.error(Some("Second"), Some("top"), vec![], AlertOptions::new());

    let frame = h.frame();
    assert!(frame.contains("Second"));
    assert!(frame.contains("✖"));
    assert!(!frame.contains("First"));

    h.service.hide();
    let frame = h.frame();
    assert!(frame.contains("First"));
    assert!(frame.contains("bottom"));
}

#[test]
fn test_hide_on_empty_stack_is_harmless() {
    let mut h = Harness::new();
    h.service.hide();
    h.service.hide();
    assert_eq!(h.depth(), 0);
    assert!(h.frame().is_empty());
}

#[test]
fn test_close_by_id_keeps_order() {
    let h = Harness::new();
    let a = h.service.info(Some("a"), None, vec![], AlertOptions::new()).unwrap();
    let b = h.service.info(Some("b"), None, vec![], AlertOptions::new()).unwrap();
    let c = h.service.info(Some("c"), None, vec![], AlertOptions::new()).unwrap();

    assert!(h.view.stack().close_by_id(b));
    assert_eq!(h.view.stack().ids(), vec![a, c]);

    h.service.hide_all();
    assert_eq!(h.depth(), 0);
}

#[test]
fn test_bare_alert_acknowledged_with_enter() {
    let mut h = Harness::new();
    h.service.success(Some("Saved"), None, vec![], AlertOptions::new());

    let frame = h.frame();
    assert!(frame.contains("OK"));
    assert!(frame.contains("✔"));

    h.key(Key::Enter);
    assert_eq!(h.depth(), 0);
}

#[test]
fn test_prompt_callback_receives_text() {
    let mut h = Harness::new();
    let name = Rc::new(RefCell::new(None::<String>));
    let sink = name.clone();
    h.service.prompt(
        Some("Rename"),
        Some("Enter a new name"),
        Some(Responder::callback(move |text| *sink.borrow_mut() = Some(text.to_string()))),
        PromptKind::PlainText,
        "draft",
        KeyboardHint::Default,
        AlertOptions::new(),
    );

    let frame = h.frame();
    assert!(frame.contains("Cancel"));
    assert!(frame.contains("OK"));
    assert!(frame.contains("draft"));

    h.type_text("-2");
    h.key(Key::Enter);
    assert_eq!(name.borrow().as_deref(), Some("draft-2"));
    assert_eq!(h.depth(), 0);
}

#[test]
fn test_prompt_cancel_skips_callback() {
    let mut h = Harness::new();
    let called = Rc::new(Cell::new(false));
    let flag = called.clone();
    h.service.prompt(
        None,
        None,
        Some(Responder::callback(move |_| flag.set(true))),
        PromptKind::PlainText,
        "",
        KeyboardHint::Default,
        AlertOptions::new(),
    );

    h.key(Key::Tab);
    assert_eq!(h.view.focused_button(), 0);
    h.key(Key::Enter);
    assert!(!called.get());
    assert_eq!(h.depth(), 0);
}

#[test]
fn test_secure_prompt_is_masked() {
    let mut h = Harness::new();
    h.service.prompt(
        Some("Password"),
        None,
        None,
        PromptKind::SecureText,
        "",
        KeyboardHint::Default,
        AlertOptions::new(),
    );
    h.type_text("hunter2");

    let frame = h.frame();
    assert!(!frame.contains("hunter2"));
    assert!(frame.contains("•••••••"));
    assert_eq!(h.view.input_value(), "hunter2");
}

#[test]
fn test_validating_prompt_stays_under_error() {
    let mut h = Harness::new();
    let accepted = Rc::new(Cell::new(None::<u32>));
    let service = h.service.clone();
    let out = accepted.clone();

    let ok = ButtonSpec::new("OK")
        .on_press(move |value: Option<&str>, close: &ManualClose| {
            match value.unwrap_or("").parse::<u32>() {
                Ok(age) => {
                    out.set(Some(age));
                    close.close();
                }
                Err(_) => {
                    service.error(Some("Invalid"), Some("Enter a number"), vec![], AlertOptions::new());
                }
            }
        })
        .prevent_auto_close();
    h.service.prompt(
        Some("Age"),
        None,
        Some(Responder::Buttons(vec![ButtonSpec::cancel("Cancel"), ok])),
        PromptKind::PlainText,
        "",
        KeyboardHint::Default,
        AlertOptions::new(),
    );

    h.type_text("abc");
    h.key(Key::Enter);
    assert_eq!(h.depth(), 2);
    assert!(h.frame().contains("Invalid"));

    // Acknowledge the error; the prompt comes back with its field reset
    h.key(Key::Enter);
    assert_eq!(h.depth(), 1);
    assert_eq!(h.view.input_value(), "");

    let prompt = h.view.stack().active_id().unwrap();
    h.type_text("30");
    assert_eq!(h.view.press(1), Resolution::KeptOpen(prompt));
    assert_eq!(accepted.get(), Some(30));
    assert_eq!(h.depth(), 0);
}

#[test]
fn test_backdrop_runs_cancel_handler() {
    let mut h = Harness::new();
    let cancelled = Rc::new(Cell::new(0));
    let count = cancelled.clone();
    h.service.warning(
        Some("Discard changes?"),
        None,
        vec![
            ButtonSpec::cancel("Keep editing").on_press(move |_, _| {
                count.set(count.get() + 1);
                false
            }),
            ButtonSpec::destructive("Discard"),
        ],
        AlertOptions::new(),
    );

    h.view.dismiss(DismissSource::Backdrop);
    assert_eq!(cancelled.get(), 1);
    assert_eq!(h.depth(), 0);
}

#[test]
fn test_blocking_alert_closed_by_hide() {
    let mut h = Harness::new();
    h.service.info(
        Some("Please wait"),
        Some("Working..."),
        vec![],
        AlertOptions::new()
            .close_on_touch_outside(false)
            .show_close_icon(false),
    );

    h.key(Key::Esc);
    h.view.dismiss(DismissSource::Backdrop);
    assert_eq!(h.depth(), 1);
    assert!(!h.frame().contains('×'));

    h.service.hide();
    assert_eq!(h.depth(), 0);
}

#[test]
fn test_style_overrides_reach_the_frame() {
    let mut h = Harness::new();
    h.service.alert(
        Some("Custom"),
        None,
        vec![],
        AlertOptions::new().icon("★"),
        AlertKind::Default,
    );
    assert!(h.frame().contains('★'));
}
