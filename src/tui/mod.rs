//! Terminal user interface hosting the data table, debug viewer and alerts.
//!
//! The screen is redrawn from [`AppState`] after every event; no widget keeps
//! state of its own.

mod app;
mod event;
mod input;
mod render;
pub(crate) mod state;
pub(crate) mod style;
mod widgets;

pub use app::App;
pub use input::{KeyAction, handle_key};
pub use state::{AppState, PopupState, Tab};
