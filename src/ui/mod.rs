//! Terminal storefront.

pub mod app;
pub mod checkout;
mod events;
mod footer;
mod header;
pub mod input;
mod layout;
pub mod mvi;
mod render;
mod runtime;
mod terminal_guard;
mod theme;
pub mod toast;

pub use app::{App, Pane, PopupKind};
pub use runtime::run;
