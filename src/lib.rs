//! Terminal admin client for a catalog REST API of categories and series.
//!
//! The binary in `main.rs` wires configuration, logging and the terminal;
//! everything else lives here so integration tests can drive it.

pub mod api;
pub mod app;
pub mod config;
pub mod keybindings;
pub mod route;
pub mod screens;
pub mod theme;
pub mod ui;
pub mod util;
