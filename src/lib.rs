//! Storefront for subtitle style templates: a catalog, a cart, a credit
//! balance and the set of owned templates, persisted between sessions.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod logging;
pub mod persist;
pub mod store;
pub mod ui;
