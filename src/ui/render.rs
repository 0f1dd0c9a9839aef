//! Render functions for the TUI.
//!
//! This module handles all rendering logic, dispatching to the appropriate
//! screen based on application state.

use crate::api::EntityKind;
use crate::app::{App, ConfirmAction};
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::{form, help, list, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 12;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Number of frames in the loading spinner animation.
pub(super) const SPINNER_FRAME_COUNT: usize = SPINNER_FRAMES.len();

pub(super) fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAME_COUNT]
}

/// Main render dispatch function.
///
/// Routes to the mounted screen's renderer, then draws overlays on top.
/// Handles terminal size validation before rendering.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // EDGE-001: Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    if app.screen.is_form() {
        form::render(f, app, chunks[1]);
    } else {
        list::render(f, app, chunks[1]);
    }
    status::render(f, app, chunks[2]);

    // Render help overlay on top of any screen when active
    if app.show_help {
        help::render(f, app);
    }

    // Render confirmation dialog on top of any screen when active
    if let Some(ref confirm) = app.pending_confirm {
        render_confirm_overlay(f, app, confirm);
    }
}

/// App name, one tab per list screen, and the API address on the right.
fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let active = app.screen.kind();
    let mut spans = vec![Span::styled(" Catalog Admin ", app.style("page_heading"))];
    for kind in [EntityKind::Category, EntityKind::Series] {
        let role = if kind == active {
            "form_button_focused"
        } else {
            "form_button"
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", kind.heading()), app.style(role)));
    }

    let used: usize = spans.iter().map(|s| s.width()).sum();
    let room = usize::from(area.width).saturating_sub(used + 2);
    let base = strip_control_chars(&app.api_base_url);
    let base = truncate_to_width(&base, room);
    let pad = room.saturating_sub(crate::util::display_width(&base));
    spans.push(Span::raw(" ".repeat(pad + 1)));
    spans.push(Span::styled(base.into_owned(), app.style("form_hint")));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render a confirmation dialog overlay centered on screen.
fn render_confirm_overlay(f: &mut Frame, app: &App, confirm: &ConfirmAction) {
    let area = f.area();

    let text = format!(
        "{}\n\n\"{}\"\n\n(y) Confirm  (n/Esc) Cancel",
        confirm.message(),
        strip_control_chars(confirm.label())
    );

    // Size: at most 56 chars wide, 8 lines tall, centered
    let width = 56u16.min(area.width.saturating_sub(4));
    let height = 8u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay = Rect::new(x, y, width, height);

    if overlay.width < 10 || overlay.height < 5 {
        return;
    }

    f.render_widget(Clear, overlay);

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(" Confirm "),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(app.style("card_text"));

    f.render_widget(paragraph, overlay);
}
