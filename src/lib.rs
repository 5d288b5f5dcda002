//! mkalert - stackable alert and prompt dialogs for terminal UIs
//!
//! Application code raises dialogs through an [`AlertService`]; a mounted
//! [`AlertView`] presents them. Alerts stack: a dialog raised while another
//! is showing covers it, and closing the top one reveals the one beneath.
//!
//! - [`AlertService`] normalizes calls like `alert`, `prompt`, `success` or
//!   `error` into [`AlertRequest`]s and forwards them to the attached host
//! - [`AlertStack`] keeps the pending requests in LIFO order
//! - [`dismissal`] decides when a button press or backdrop tap removes a request
//! - [`AlertView`] draws the top request and routes keyboard and mouse input
//!
//! ```no_run
//! use mkalert::{AlertKind, AlertOptions, AlertService, AlertView, ButtonSpec, Component};
//!
//! let service = AlertService::new();
//! let mut view = AlertView::new(service.clone());
//! view.on_mount();
//!
//! service.alert(
//!     Some("Delete file?"),
//!     Some("This cannot be undone."),
//!     vec![ButtonSpec::cancel("Keep"), ButtonSpec::destructive("Delete")],
//!     AlertOptions::new(),
//!     AlertKind::Warning,
//! );
//! ```

pub mod button;
pub mod component;
pub mod components;
pub mod config;
pub mod context;
pub mod dismissal;
pub mod event;
pub mod layout;
pub mod render;
pub mod request;
pub mod service;
pub mod stack;
pub mod style;
pub mod terminal;
pub mod theme;

// Re-export commonly used types
pub use button::{ButtonRole, ButtonSpec, OnActivate, PressOutcome};
pub use component::Component;
pub use components::{AlertView, Card, ScrollView, TextInput};
pub use config::AlertDefaults;
pub use context::{RenderContext, UseTheme};
pub use dismissal::{DismissSource, Resolution};
pub use event::{Event, EventHandler, EventPoller, Key, MouseButton, MouseEvent};
pub use layout::{FlexDirection, FlexLayout, Rect, Size};
pub use render::{CaptureBuffer, Renderer};
pub use request::{
    AlertId, AlertKind, AlertOptions, AlertRequest, ButtonLayout, KeyboardHint, PromptKind,
    StyleOverrides,
};
pub use service::{AlertHost, AlertService, Responder};
pub use stack::{AlertStack, ManualClose, RequestState};
pub use style::{Style, StyleProperty, TextAlign};
pub use terminal::{TerminalCapabilities, TerminalContext, TerminalGeometry};
pub use theme::{BorderChars, BorderStyle, Color, Palette, Theme};
