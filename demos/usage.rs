//! mkalert playground - every kind of alert, one key each

use anyhow::Result;
use mkalert::{
    AlertDefaults, AlertKind, AlertOptions, AlertService, AlertView, ButtonLayout, ButtonSpec,
    Card, Color, Component, Event, EventHandler, EventPoller, Key, KeyboardHint, ManualClose,
    PromptKind, Rect, RenderContext, Renderer, Responder, Style, Theme,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

type Deferred = Rc<RefCell<Vec<(Instant, Box<dyn FnOnce()>)>>>;

const MENU: &[(char, &str)] = &[
    ('1', "Success"),
    ('2', "Error"),
    ('3', "Warning"),
    ('4', "Info"),
    ('5', "Simple text prompt"),
    ('6', "Validation (must be 18+)"),
    ('7', "Secure password"),
    ('8', "Blocking loader (no close)"),
    ('9', "Async action (wait, then close)"),
    ('d', "Destructive action"),
    ('c', "Custom style"),
    ('v', "Vertical stack"),
    ('l', "Long message"),
];

fn after(deferred: &Deferred, delay: Duration, action: impl FnOnce() + 'static) {
    deferred
        .borrow_mut()
        .push((Instant::now() + delay, Box::new(action)));
}

fn run_due(deferred: &Deferred) -> bool {
    let now = Instant::now();
    let due: Vec<_> = {
        let mut pending = deferred.borrow_mut();
        let (due, rest): (Vec<_>, Vec<_>) = pending.drain(..).partition(|(at, _)| *at <= now);
        *pending = rest;
        due
    };
    let ran = !due.is_empty();
    for (_, action) in due {
        action();
    }
    ran
}

fn trigger(choice: char, alerts: &AlertService, deferred: &Deferred) {
    let none = AlertOptions::new;
    match choice {
        '1' => {
            alerts.success(
                Some("Profile Saved"),
                Some("Your changes have been successfully saved to the cloud."),
                vec![],
                none(),
            );
        }
        '2' => {
            alerts.error(
                Some("Upload Failed"),
                Some("Network connection timed out. Please try again later."),
                vec![],
                none(),
            );
        }
        '3' => {
            alerts.warning(
                Some("Storage Full"),
                Some("You are running low on storage space."),
                vec![
                    ButtonSpec::cancel("Later"),
                    ButtonSpec::new("Clean Up").on_press(|_, _| tracing::info!("clean up requested")),
                ],
                none(),
            );
        }
        '4' => {
            alerts.info(
                Some("Did you know?"),
                Some("Tab moves between buttons, Esc dismisses."),
                vec![],
                none(),
            );
        }
        '5' => {
            let follow_up = alerts.clone();
            alerts.prompt(
                Some("Rename File"),
                Some("Enter a new name for your document:"),
                Some(Responder::callback(move |text| {
                    let message = format!("File renamed to {}", text);
                    follow_up.success(Some("Renamed"), Some(&message), vec![], AlertOptions::new());
                })),
                PromptKind::PlainText,
                "Untitled_Doc",
                KeyboardHint::Default,
                none(),
            );
        }
        '6' => {
            let follow_up = alerts.clone();
            let enter = ButtonSpec::new("Enter")
                .closable(false)
                .on_press(move |age: Option<&str>, close: &ManualClose| {
                    match age.unwrap_or("").parse::<u32>() {
                        Ok(age) if age >= 18 => {
                            close.close();
                            follow_up.success(
                                Some("Access Granted"),
                                Some("Welcome to the club!"),
                                vec![],
                                AlertOptions::new(),
                            );
                        }
                        _ => {
                            follow_up.error(
                                Some("Access Denied"),
                                Some("You must be over 18."),
                                vec![],
                                AlertOptions::new(),
                            );
                        }
                    }
                });
            alerts.prompt(
                Some("Age Verification"),
                Some("You must be 18+ to enter."),
                Some(Responder::Buttons(vec![ButtonSpec::cancel("Cancel"), enter])),
                PromptKind::PlainText,
                "",
                KeyboardHint::Numeric,
                none(),
            );
        }
        '7' => {
            alerts.prompt(
                Some("Confirm Password"),
                Some("Enter your current password to make changes."),
                Some(Responder::callback(|_| tracing::info!("password entered"))),
                PromptKind::SecureText,
                "",
                KeyboardHint::Default,
                none(),
            );
        }
        '8' => {
            alerts.alert(
                Some("Syncing Data"),
                Some("Please do not close the app while we sync your data..."),
                vec![ButtonSpec::new("Wait...").closable(false).on_press(|_, _| {})],
                none().show_close_icon(false).close_on_touch_outside(false),
                AlertKind::Default,
            );
            let later = alerts.clone();
            after(deferred, Duration::from_secs(3), move || {
                later.hide();
                later.success(Some("Sync Complete"), Some("Your data is up to date."), vec![], AlertOptions::new());
            });
        }
        '9' => {
            let queue = deferred.clone();
            let follow_up = alerts.clone();
            alerts.alert(
                Some("Download Item?"),
                Some("This file is 50MB."),
                vec![
                    ButtonSpec::cancel("Cancel"),
                    ButtonSpec::new("Download")
                        .closable(false)
                        .on_press(move |_, close: &ManualClose| {
                            let close = close.clone();
                            let done = follow_up.clone();
                            after(&queue, Duration::from_millis(1500), move || {
                                close.close();
                                done.success(
                                    Some("Downloaded"),
                                    Some("Check your downloads folder."),
                                    vec![],
                                    AlertOptions::new(),
                                );
                            });
                        }),
                ],
                none(),
                AlertKind::Default,
            );
        }
        'd' => {
            alerts.alert(
                Some("Delete Account?"),
                Some("This action cannot be undone. All data will be lost."),
                vec![
                    ButtonSpec::cancel("Keep Account"),
                    ButtonSpec::destructive("Delete Forever").on_press(|_, _| tracing::info!("deleted")),
                ],
                none().button_layout(ButtonLayout::Column),
                AlertKind::Default,
            );
        }
        'c' => {
            let gold = Color::rgb(0xF5, 0x9E, 0x0B);
            alerts.alert(
                Some("Premium Unlocked!"),
                Some("You now have access to all gold features."),
                vec![ButtonSpec::new("Awesome!")],
                none()
                    .container_style(Style::new().color(gold).background(Color::rgb(0xFF, 0xFB, 0xEB)))
                    .title_style(Style::new().color(Color::rgb(0xD9, 0x77, 0x06)))
                    .message_style(Style::new().color(Color::rgb(0x92, 0x40, 0x0E))),
                AlertKind::Success,
            );
        }
        'v' => {
            alerts.alert(
                Some("Share Content"),
                Some("Choose a platform"),
                vec![
                    ButtonSpec::new("Share to Instagram"),
                    ButtonSpec::new("Share to Twitter"),
                    ButtonSpec::new("Copy Link"),
                    ButtonSpec::cancel("Cancel"),
                ],
                none().button_layout(ButtonLayout::Column),
                AlertKind::Default,
            );
        }
        'l' => {
            alerts.info(
                Some("System Log Details"),
                Some(
                    "This is an example of a reasonably long message that might appear in an \
                     alert. It contains enough text to wrap multiple lines to test the alignment \
                     of the alert card. Usually, alerts should be concise, but sometimes verbose \
                     errors occur.",
                ),
                vec![],
                none(),
            );
        }
        _ => {}
    }
}

fn draw_menu(renderer: &mut Renderer, theme: &Theme) -> Result<()> {
    let heading = format!("{}\x1b[1m", theme.fg(theme.title_fg));
    renderer.move_cursor(2, 1)?;
    renderer.write_styled("Alerts Playground", &heading)?;
    renderer.move_cursor(2, 2)?;
    renderer.write_styled("Press a key to raise an alert, q to quit", &theme.fg(theme.message_fg))?;

    for (row, (key, label)) in MENU.iter().enumerate() {
        renderer.move_cursor(4, 4 + row as u16)?;
        renderer.write_text(&format!("[{}] {}", key, label))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let mut renderer = Renderer::new()?;
    let caps = renderer.capabilities();
    let theme = Theme::new(caps);
    renderer.enter_alt_screen()?;
    renderer.hide_cursor()?;

    let events = EventPoller::new(caps.mouse)?;

    let alerts = AlertService::with_defaults(AlertDefaults::from_env());
    let mut view = AlertView::new(alerts.clone()).with_card(Card::new().with_max_width(56));
    view.on_mount();

    let deferred: Deferred = Rc::new(RefCell::new(Vec::new()));
    let ctx = RenderContext::new(&theme);
    let mut redraw = true;

    loop {
        if redraw || view.is_dirty() {
            let (cols, rows) = renderer.context().char_dimensions();
            renderer.begin_frame()?;
            renderer.clear()?;
            draw_menu(&mut renderer, &theme)?;
            view.render(&mut renderer, Rect::fullscreen(cols, rows), &ctx)?;
            renderer.end_frame()?;
            redraw = false;
        }

        if run_due(&deferred) {
            redraw = true;
        }

        let Some(event) = events.poll(Duration::from_millis(50))? else {
            continue;
        };

        if view.handle_event(&event) {
            continue;
        }

        match event {
            Event::Key(Key::Char('q')) | Event::Key(Key::Ctrl('c')) => break,
            Event::Key(Key::Char(choice)) => trigger(choice, &alerts, &deferred),
            Event::Resize(_, _) => {
                renderer.refresh_geometry()?;
                redraw = true;
            }
            _ => {}
        }
    }

    view.on_unmount();
    renderer.exit_alt_screen()?;
    renderer.show_cursor()?;
    Ok(())
}
