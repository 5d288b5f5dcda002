//! Built-in UI components

pub mod alert_view;
pub mod card;
pub mod scroll;
pub mod text_input;

pub use alert_view::AlertView;
pub use card::Card;
pub use scroll::ScrollView;
pub use text_input::TextInput;
