//! Help overlay: scrollable keybinding table.
//!
//! Shows the live bindings grouped by context, including config overrides.
//! Keys bound to the same action share one row.

use crate::app::App;
use crate::keybindings::{Action, Context};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

/// Context display order for the help screen.
const CONTEXT_ORDER: [Context; 3] = [Context::Global, Context::List, Context::Form];

/// One help row: every key for `action` in a context.
#[derive(Debug, PartialEq)]
struct HelpEntry {
    keys: String,
    description: &'static str,
}

/// Group bindings per context, merging keys that trigger the same action.
fn help_sections(app: &App) -> Vec<(Context, Vec<HelpEntry>)> {
    let bindings = app.keybindings.all_bindings();
    CONTEXT_ORDER
        .into_iter()
        .filter_map(|ctx| {
            let mut entries: Vec<(Action, HelpEntry)> = Vec::new();
            for (c, key, action, description) in &bindings {
                if *c != ctx {
                    continue;
                }
                match entries.iter_mut().find(|(a, _)| a == action) {
                    Some((_, entry)) => {
                        entry.keys.push_str(", ");
                        entry.keys.push_str(key);
                    }
                    None => entries.push((
                        *action,
                        HelpEntry {
                            keys: key.clone(),
                            description: *description,
                        },
                    )),
                }
            }
            let entries: Vec<HelpEntry> = entries.into_iter().map(|(_, e)| e).collect();
            (!entries.is_empty()).then_some((ctx, entries))
        })
        .collect()
}

/// Render the help overlay on top of the current screen.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Leave a margin around the overlay
    let overlay = centered_rect(80, 80, area);
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    f.render_widget(Clear, overlay);

    let mut rows: Vec<Row> = Vec::new();
    for (ctx, entries) in help_sections(app) {
        if !rows.is_empty() {
            rows.push(Row::new(vec![String::new(), String::new()]));
        }
        rows.push(
            Row::new(vec![
                Line::from(Span::styled(
                    format!("-- {} --", ctx.title()),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ])
            .style(app.style("page_heading")),
        );
        for entry in entries {
            rows.push(Row::new(vec![
                format!("  {}", entry.keys),
                entry.description.to_string(),
            ]));
        }
    }

    let total_rows = rows.len();

    // -2 border -1 header -1 header margin
    let visible_height = overlay.height.saturating_sub(4) as usize;
    let max_scroll = total_rows.saturating_sub(visible_height);
    let scroll = app.help_scroll_offset.min(max_scroll);
    let visible_rows: Vec<Row> = rows.into_iter().skip(scroll).take(visible_height).collect();

    let title = if max_scroll > 0 {
        format!(
            " Help ({}/{}) ",
            scroll.saturating_add(1),
            max_scroll.saturating_add(1)
        )
    } else {
        " Help (? to close) ".to_string()
    };

    let widths = [Constraint::Length(22), Constraint::Min(20)];

    let table = Table::new(visible_rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(title),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::UNDERLINED),
                )
                .bottom_margin(1),
        )
        .style(app.style("card_text"));

    f.render_widget(table, overlay);

    if max_scroll > 0 && scroll < max_scroll {
        let hint = Line::from(vec![Span::styled(
            " j/k to scroll, ? or Esc to close ",
            app.style("form_hint"),
        )]);
        let hint_area = Rect {
            x: overlay.x + 1,
            y: overlay.y + overlay.height.saturating_sub(1),
            width: overlay.width.saturating_sub(2),
            height: 1,
        };
        f.render_widget(Paragraph::new(hint), hint_area);
    }
}

/// Create a centered rectangle with the given percentage of the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
