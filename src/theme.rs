//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Page chrome --
    pub page_heading: Style,
    pub error_banner: Style,
    pub info_banner: Style,
    pub spinner: Style,

    // -- Cards --
    pub card_border: Style,
    pub card_border_selected: Style,
    pub card_title: Style,
    pub card_text: Style,
    pub card_label: Style,
    pub card_muted: Style,
    pub card_image: Style,

    // -- Forms --
    pub form_label: Style,
    pub form_label_focused: Style,
    pub form_input: Style,
    pub form_input_focused: Style,
    pub form_button: Style,
    pub form_button_focused: Style,
    pub form_hint: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            page_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            error_banner: Style::default().fg(Color::White).bg(Color::Red),
            info_banner: Style::default().fg(Color::Cyan),
            spinner: Style::default().fg(Color::Yellow),

            card_border: Style::default().fg(Color::DarkGray),
            card_border_selected: Style::default().fg(Color::Cyan),
            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_text: Style::default(),
            card_label: Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            card_muted: Style::default().fg(Color::DarkGray),
            card_image: Style::default().fg(Color::Blue),

            form_label: Style::default().fg(Color::Gray),
            form_label_focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            form_input: Style::default(),
            form_input_focused: Style::default().bg(Color::DarkGray).fg(Color::White),
            form_button: Style::default().fg(Color::Gray),
            form_button_focused: Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            form_hint: Style::default().fg(Color::DarkGray),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
        }
    }

    /// Light palette, adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            page_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            error_banner: Style::default().fg(Color::White).bg(Color::Red),
            info_banner: Style::default().fg(Color::Blue),
            spinner: Style::default().fg(Color::Magenta),

            card_border: Style::default().fg(Color::Gray),
            card_border_selected: Style::default().fg(Color::Blue),
            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_text: Style::default().fg(Color::Black),
            card_label: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            card_muted: Style::default().fg(Color::DarkGray),
            card_image: Style::default().fg(Color::Blue),

            form_label: Style::default().fg(Color::DarkGray),
            form_label_focused: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            form_input: Style::default().fg(Color::Black),
            form_input_focused: Style::default().bg(Color::Blue).fg(Color::White),
            form_button: Style::default().fg(Color::DarkGray),
            form_button_focused: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            form_hint: Style::default().fg(Color::DarkGray),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup.
///
/// Built from a `ColorPalette`, this allows resolving role names (e.g.
/// `"card_title"`) to their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 21] = [
    "page_heading",
    "error_banner",
    "info_banner",
    "spinner",
    "card_border",
    "card_border_selected",
    "card_title",
    "card_text",
    "card_label",
    "card_muted",
    "card_image",
    "form_label",
    "form_label_focused",
    "form_input",
    "form_input_focused",
    "form_button",
    "form_button_focused",
    "form_hint",
    "status_bar",
    "panel_border",
    "panel_border_focused",
];

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 21] = [
            p.page_heading,
            p.error_banner,
            p.info_banner,
            p.spinner,
            p.card_border,
            p.card_border_selected,
            p.card_title,
            p.card_text,
            p.card_label,
            p.card_muted,
            p.card_image,
            p.form_label,
            p.form_label_focused,
            p.form_input,
            p.form_input_focused,
            p.form_button,
            p.form_button_focused,
            p.form_hint,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
        ];

        let mut map = HashMap::with_capacity(ROLE_NAMES.len());
        for (name, style) in ROLE_NAMES.iter().zip(styles.iter()) {
            map.insert(*name, *style);
        }

        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
