//! Terminal User Interface module.
//!
//! This module provides the TUI for the catalog admin, including:
//! - Main event loop (`run`)
//! - Input handling for list screens, forms, and overlays
//! - Rendering for the card grids, forms, and dialogs
//! - Background request processing
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - Screen rendering dispatch and confirmation overlay
//! - `helpers` - Request task spawning and panic capture
//! - `list` - Card grid for list screens
//! - `cards` - Category and series card contents
//! - `form` - Create/edit forms
//! - `status` - Status bar widget
//! - `help` - Keybinding help overlay

mod cards;
mod events;
mod form;
mod help;
mod helpers;
mod input;
mod list;
mod loop_runner;
mod render;
mod status;

// Re-export the public API
pub use loop_runner::{run, Action};
