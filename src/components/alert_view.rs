//! Alert surface - renders the active alert and routes input to it
//!
//! Mounting the view attaches its stack to an [`AlertService`]; unmounting
//! detaches it again unless another surface has been attached since. Only the
//! top request of the stack is drawn. While any alert is showing the view
//! swallows every key and mouse event so nothing underneath reacts.
//!
//! Keyboard:
//! - Tab / Shift+Tab cycle the focused button
//! - Left / Right (and Up / Down for stacked buttons) cycle too, except in
//!   prompts where they move the text cursor
//! - Up / Down otherwise scroll a message too tall for the card
//! - Enter presses the focused button
//! - Esc dismisses like back navigation
//!
//! Mouse: buttons and the close icon are clickable; a click outside the card
//! dismisses like a backdrop tap. The wheel scrolls the message.
//!
//! Buttons, the prompt field and the icon are laid out before the message, so
//! on a short screen the message is the part that shrinks.

use crate::component::Component;
use crate::components::card::{wrap_text, write_aligned, Card};
use crate::components::scroll::ScrollView;
use crate::components::text_input::{TextInput, MASK_CHAR};
use crate::context::RenderContext;
use crate::dismissal::{self, DismissSource, Resolution};
use crate::event::{Event, EventHandler, Key, MouseButton, MouseEvent};
use crate::layout::{FlexLayout, Rect, Size};
use crate::render::Renderer;
use crate::request::{AlertId, AlertRequest};
use crate::service::{AlertHost, AlertService};
use crate::stack::AlertStack;
use crate::style::{Style, TextAlign};
use anyhow::Result;
use std::rc::Rc;

/// Hit-test geometry from the last frame
#[derive(Debug, Clone)]
struct FrameLayout {
    id: AlertId,
    card: Rect,
    close_icon: Option<Rect>,
    buttons: Vec<Rect>,
}

/// Presentation surface for an [`AlertStack`]
pub struct AlertView {
    service: AlertService,
    stack: AlertStack,
    host: Rc<dyn AlertHost>,
    card: Card,
    input: TextInput,
    message: ScrollView,
    focus: usize,
    /// Request the input and focus were last reset for
    synced: Option<AlertId>,
    seen_revision: u64,
    frame: Option<FrameLayout>,
    dirty: bool,
}

impl AlertView {
    pub fn new(service: AlertService) -> Self {
        let stack = AlertStack::new();
        let host: Rc<dyn AlertHost> = Rc::new(stack.clone());
        AlertView {
            service,
            seen_revision: stack.revision(),
            stack,
            host,
            card: Card::new(),
            input: TextInput::new(),
            message: ScrollView::new(),
            focus: 0,
            synced: None,
            frame: None,
            dirty: true,
        }
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.card = card;
        self
    }

    /// The stack this view presents
    pub fn stack(&self) -> &AlertStack {
        &self.stack
    }

    pub fn is_active(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Text currently typed into the active prompt
    pub fn input_value(&self) -> &str {
        self.input.value()
    }

    /// Index of the focused button of the active request
    pub fn focused_button(&self) -> usize {
        self.focus
    }

    /// Press a button of the active request as if it were clicked
    pub fn press(&mut self, index: usize) -> Resolution {
        self.sync();
        let Some(request) = self.stack.active() else {
            return Resolution::NoActive;
        };
        let value = request.is_prompt.then(|| self.input.value().to_string());

        let resolution = dismissal::press(&self.stack, index, value.as_deref());
        self.dirty = true;
        self.sync();
        resolution
    }

    /// Dismiss the active request from outside its buttons
    pub fn dismiss(&mut self, source: DismissSource) -> Option<AlertId> {
        let dismissed = dismissal::dismiss(&self.stack, source);
        self.dirty = true;
        self.sync();
        dismissed
    }

    /// Reset input and focus when a different request comes to the top
    fn sync(&mut self) {
        let revision = self.stack.revision();
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.dirty = true;
        }

        let active = self.stack.active();
        let active_id = active.as_ref().map(|r| r.id);
        if active_id == self.synced {
            return;
        }
        self.synced = active_id;
        self.frame = None;
        self.message.scroll_to_top();
        self.dirty = true;

        match active {
            Some(request) => {
                let mask = request.prompt_kind.is_secure().then_some(MASK_CHAR);
                self.input.reset(&request.default_value, mask, request.keyboard);
                if request.is_prompt {
                    self.input.on_focus();
                } else {
                    self.input.on_blur();
                }
                self.focus = request.buttons.len().saturating_sub(1);
                tracing::trace!(id = %request.id, "alert view synced");
            }
            None => {
                self.input.clear();
                self.input.on_blur();
                self.focus = 0;
            }
        }
    }

    fn cycle_focus(&mut self, count: usize, forward: bool) {
        if count == 0 {
            return;
        }
        self.focus = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
        self.dirty = true;
    }

    fn handle_key(&mut self, key: &Key, request: &AlertRequest) {
        let count = request.buttons.len();
        match key {
            Key::Tab => self.cycle_focus(count, true),
            Key::BackTab => self.cycle_focus(count, false),
            Key::Right if !request.is_prompt => self.cycle_focus(count, true),
            Key::Left if !request.is_prompt => self.cycle_focus(count, false),
            Key::Down if !request.is_prompt && request.stacks_buttons() => {
                self.cycle_focus(count, true)
            }
            Key::Up if !request.is_prompt && request.stacks_buttons() => {
                self.cycle_focus(count, false)
            }
            Key::Up => self.dirty |= self.message.scroll_up(),
            Key::Down => self.dirty |= self.message.scroll_down(),
            Key::Enter => {
                self.press(self.focus);
            }
            Key::Esc => {
                self.dismiss(DismissSource::BackNavigation);
            }
            _ if request.is_prompt => {
                if self.input.handle_event(&Event::Key(*key)) {
                    self.dirty = true;
                }
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, col: u16, row: u16) {
        let Some(frame) = self.frame.clone() else {
            return;
        };
        if Some(frame.id) != self.stack.active_id() {
            return;
        }

        if frame.close_icon.is_some_and(|r| r.contains(col, row)) {
            self.dismiss(DismissSource::CloseIcon);
        } else if let Some(index) = frame.buttons.iter().position(|r| r.contains(col, row)) {
            self.focus = index;
            self.press(index);
        } else if !frame.card.contains(col, row) {
            self.dismiss(DismissSource::Backdrop);
        }
    }

    fn button_rows(request: &AlertRequest) -> u16 {
        if request.stacks_buttons() {
            request.buttons.len() as u16
        } else {
            1
        }
    }

    /// Rows needed for the card contents at `width`
    fn content_rows(request: &AlertRequest, width: u16) -> (Vec<String>, Vec<String>, u16) {
        let title = request
            .title
            .as_deref()
            .map(|t| wrap_text(t, width))
            .unwrap_or_default();
        let message = request
            .message
            .as_deref()
            .map(|m| wrap_text(m, width))
            .unwrap_or_default();

        // Icon and the blank row under it
        let mut height = 2 + title.len() as u16 + message.len() as u16;
        if request.is_prompt {
            height += 1 + 3;
        }
        height += 1 + Self::button_rows(request);
        (title, message, height)
    }

    fn text_style(base: String, fill: &str, over: Option<&Style>, ctx: &RenderContext) -> String {
        let over = over.map(|s| s.to_ansi(ctx.theme.caps())).unwrap_or_default();
        format!("{}{}{}", base, fill, over)
    }

    fn draw_input(&mut self, renderer: &mut Renderer, area: Rect, request: &AlertRequest, ctx: &RenderContext) -> Result<()> {
        let theme = ctx.theme;
        let chars = theme.border_chars();
        let border = theme.input_border_style(request.kind, self.input.is_focused());
        let inner = area.width.saturating_sub(2) as usize;

        renderer.move_cursor(area.x, area.y)?;
        let top: String = std::iter::once(chars.top_left)
            .chain(std::iter::repeat_n(chars.horizontal, inner))
            .chain(std::iter::once(chars.top_right))
            .collect();
        renderer.write_styled(&top, &border)?;

        renderer.move_cursor(area.x, area.y + 1)?;
        renderer.write_styled(&chars.vertical.to_string(), &border)?;
        let field = Rect::new(area.x + 1, area.y + 1, inner as u16, 1);
        self.input.render(renderer, field, ctx)?;
        renderer.move_cursor(area.right().saturating_sub(1), area.y + 1)?;
        renderer.write_styled(&chars.vertical.to_string(), &border)?;

        renderer.move_cursor(area.x, area.y + 2)?;
        let bottom: String = std::iter::once(chars.bottom_left)
            .chain(std::iter::repeat_n(chars.horizontal, inner))
            .chain(std::iter::once(chars.bottom_right))
            .collect();
        renderer.write_styled(&bottom, &border)
    }

    fn draw_buttons(&self, renderer: &mut Renderer, area: Rect, request: &AlertRequest, ctx: &RenderContext) -> Result<Vec<Rect>> {
        let count = request.buttons.len();
        let rects = if request.stacks_buttons() {
            FlexLayout::column().layout(area, &vec![Size::Fixed(1); count])
        } else {
            FlexLayout::row().gap(2).layout(area, &vec![Size::Flex(1); count])
        };

        for (index, (button, rect)) in request.buttons.iter().zip(&rects).enumerate() {
            let style = ctx
                .theme
                .button_style(request.kind, button.role, index == self.focus);
            write_aligned(renderer, *rect, &button.label, &style, TextAlign::Center)?;
        }
        Ok(rects)
    }
}

impl EventHandler for AlertView {
    fn handle_event(&mut self, event: &Event) -> bool {
        self.sync();
        let Some(request) = self.stack.active() else {
            return false;
        };

        match event {
            Event::Key(key) => self.handle_key(key, &request),
            Event::Mouse(MouseEvent::Press(MouseButton::Left, col, row)) => {
                self.handle_click(*col, *row)
            }
            Event::Mouse(MouseEvent::ScrollUp(..)) => self.dirty |= self.message.scroll_up(),
            Event::Mouse(MouseEvent::ScrollDown(..)) => self.dirty |= self.message.scroll_down(),
            Event::Mouse(_) => {}
            Event::Paste(_) if request.is_prompt => {
                self.dirty |= self.input.handle_event(event);
            }
            Event::Paste(_) => {}
            Event::Resize(..) | Event::FocusGained | Event::FocusLost => {
                self.dirty = true;
                return false;
            }
        }
        true
    }
}

impl Component for AlertView {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        self.sync();
        let Some(request) = self.stack.active() else {
            self.frame = None;
            self.dirty = false;
            return Ok(());
        };

        let theme = ctx.theme;
        let card = self.card.with_close_icon(request.show_close_icon);
        let width = card.content_width(bounds);
        let (title, message, height) = Self::content_rows(&request, width);
        let card_rect = card.bounds(bounds, height);
        let palette = theme.palette(request.kind);
        let container = request.styles.container.as_ref();

        card.draw(renderer, card_rect, ctx, palette.primary, container)?;

        let fill = container
            .and_then(Style::background_color)
            .map(|c| theme.bg(c))
            .unwrap_or_default();
        let area = card.content_bounds(card_rect);

        // Bottom up: buttons, the blank row above them, then the prompt field
        let (rest, button_area) = area.take_bottom(Self::button_rows(&request));
        let (mut rest, _) = rest.take_bottom(1);
        let mut field = None;
        if request.is_prompt {
            let (upper, input) = rest.take_bottom(3);
            field = Some(input);
            rest = upper.take_bottom(1).0;
        }

        // Icon
        let (row, after) = rest.take_row();
        if !row.is_empty() {
            let icon = request.icon.as_deref().unwrap_or(&palette.icon);
            let glyph = format!(" {} ", icon);
            let glyph_len = glyph.chars().count() as u16;
            renderer.move_cursor(row.x + TextAlign::Center.offset(glyph_len, row.width), row.y)?;
            renderer.write_styled(&glyph, &theme.icon_style(request.kind))?;
        }
        rest = after.take_row().1;

        let title_over = request.styles.title.as_ref();
        let title_style = Self::text_style(theme.title_style(), &fill, title_over, ctx);
        let title_align = title_over.and_then(Style::alignment).unwrap_or_default();
        for line in &title {
            if rest.is_empty() {
                break;
            }
            let (row, after) = rest.take_row();
            write_aligned(renderer, row, line, &title_style, title_align)?;
            rest = after;
        }

        // Whatever is left is the message viewport
        let message_over = request.styles.message.as_ref();
        let message_style = Self::text_style(theme.message_style(), &fill, message_over, ctx);
        let message_align = message_over.and_then(Style::alignment).unwrap_or_default();
        self.message.resize(message.len(), rest.height as usize);
        for (offset, line) in message[self.message.visible_range()].iter().enumerate() {
            let row = Rect::new(rest.x, rest.y + offset as u16, rest.width, 1);
            write_aligned(renderer, row, line, &message_style, message_align)?;
        }
        if !rest.is_empty() {
            // Markers sit in the right padding column
            if self.message.can_scroll_up() {
                renderer.move_cursor(rest.right(), rest.y)?;
                renderer.write_styled("▲", &message_style)?;
            }
            if self.message.can_scroll_down() {
                renderer.move_cursor(rest.right(), rest.bottom() - 1)?;
                renderer.write_styled("▼", &message_style)?;
            }
        }

        if let Some(field) = field.filter(|f| f.height == 3) {
            self.draw_input(renderer, field, &request, ctx)?;
        }

        let buttons = self.draw_buttons(renderer, button_area, &request, ctx)?;

        self.frame = Some(FrameLayout {
            id: request.id,
            card: card_rect,
            close_icon: card.close_icon_rect(card_rect),
            buttons,
        });
        self.dirty = false;
        Ok(())
    }

    fn on_mount(&mut self) {
        self.service.attach(self.host.clone());
    }

    fn on_unmount(&mut self) {
        self.service.detach_host(&self.host);
        self.frame = None;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
            || self.stack.revision() != self.seen_revision
            || self.stack.active_id() != self.synced
    }

    fn name(&self) -> &str {
        "AlertView"
    }
}
