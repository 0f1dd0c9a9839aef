//! Card grid for the category and series list screens.

use crate::api::{Entity, EntityKind};
use crate::app::{App, Screen};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::screens::ListView;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::cards;
use super::render::spinner;

/// Minimum card width before the grid drops a column.
const MIN_CARD_WIDTH: u16 = 38;
const MAX_COLUMNS: usize = 3;

/// One card ready to draw.
struct Card {
    title: String,
    body: Vec<Line<'static>>,
    height: u16,
}

/// The request state the grid needs, independent of the item type.
struct GridState {
    kind: EntityKind,
    loading: bool,
    error: Option<&'static str>,
    empty: bool,
    selected: usize,
}

impl GridState {
    fn of<T: Entity>(list: &ListView<T>) -> Self {
        Self {
            kind: T::KIND,
            loading: list.loading,
            error: list.error,
            empty: list.shows_empty_message(),
            selected: list.selected,
        }
    }
}

/// Cards per row for a given width, between 1 and 3.
pub(super) fn columns_for(width: u16) -> usize {
    usize::from(width / MIN_CARD_WIDTH).clamp(1, MAX_COLUMNS)
}

pub(super) fn render(f: &mut Frame, app: &mut App, area: Rect) {
    let columns = columns_for(area.width);
    app.list_columns = columns;
    let app = &*app;

    // -2 for card borders
    let card_width = (area.width / columns as u16).saturating_sub(2) as usize;

    let (state, items) = match &app.screen {
        Screen::Categories(list) => {
            let items: Vec<Card> = list
                .items
                .iter()
                .map(|c| Card {
                    title: cards::title(&c.name, card_width),
                    body: cards::category_body(c, card_width, &app.theme),
                    height: cards::category_height(c, card_width),
                })
                .collect();
            (GridState::of(list), items)
        }
        Screen::Series(list) => {
            let items: Vec<Card> = list
                .items
                .iter()
                .map(|s| Card {
                    title: cards::title(&s.title, card_width),
                    body: cards::series_body(
                        s,
                        &app.category_display_name(s),
                        card_width,
                        &app.theme,
                    ),
                    height: cards::series_height(),
                })
                .collect();
            (GridState::of(list), items)
        }
        _ => return,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    render_heading(f, app, &state, chunks[0]);
    render_banner(f, app, &state, chunks[1]);
    render_grid(f, app, items, &state, columns, chunks[2]);
}

fn render_heading(f: &mut Frame, app: &App, state: &GridState, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} ", state.kind.heading()),
        app.style("page_heading"),
    )];
    for (action, label) in [
        (KbAction::Create, "new"),
        (KbAction::Edit, "edit"),
        (KbAction::Delete, "delete"),
        (KbAction::Refresh, "refresh"),
        (KbAction::SwitchList, "switch"),
    ] {
        if let Some(key) = app.keybindings.key_hint(KbContext::List, action) {
            spans.push(Span::styled(
                format!(" [{}] {}", key, label),
                app.style("form_hint"),
            ));
        }
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// One line under the heading: error, loading indicator, or empty message.
fn render_banner(f: &mut Frame, app: &App, state: &GridState, area: Rect) {
    let line = if let Some(error) = state.error {
        Line::from(Span::styled(format!(" {} ", error), app.style("error_banner")))
    } else if state.loading {
        Line::from(vec![
            Span::styled(format!(" {} ", spinner(app.spinner_frame)), app.style("spinner")),
            Span::styled(
                format!("Loading {}...", state.kind.collection_path()),
                app.style("card_muted"),
            ),
        ])
    } else if state.empty {
        Line::from(Span::styled(
            format!(" {}", state.kind.empty_message()),
            app.style("info_banner"),
        ))
    } else {
        return;
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_grid(
    f: &mut Frame,
    app: &App,
    items: Vec<Card>,
    state: &GridState,
    columns: usize,
    area: Rect,
) {
    if items.is_empty() || area.height == 0 {
        return;
    }

    let row_heights: Vec<u16> = items
        .chunks(columns)
        .map(|row| row.iter().map(|c| c.height).max().unwrap_or(0))
        .collect();
    let selected_row = state.selected / columns;
    let first_row = first_visible_row(&row_heights, selected_row, area.height);

    let mut y = area.y;
    let bottom = area.y + area.height;
    let card_width = area.width / columns as u16;

    for (row_idx, row) in items.chunks(columns).enumerate().skip(first_row) {
        let height = row_heights[row_idx].min(bottom.saturating_sub(y));
        if height == 0 {
            break;
        }
        for (col, card) in row.iter().enumerate() {
            let index = row_idx * columns + col;
            let card_area = Rect::new(area.x + card_width * col as u16, y, card_width, height);
            render_card(f, app, card, index == state.selected, card_area);
        }
        y += height;
    }
}

/// First row to draw so that `selected_row` ends up fully visible.
fn first_visible_row(row_heights: &[u16], selected_row: usize, available: u16) -> usize {
    let mut first = selected_row.min(row_heights.len().saturating_sub(1));
    let mut used = row_heights.get(first).copied().unwrap_or(0);
    while first > 0 {
        let above = row_heights[first - 1];
        if used + above > available {
            break;
        }
        used += above;
        first -= 1;
    }
    first
}

fn render_card(f: &mut Frame, app: &App, card: &Card, selected: bool, area: Rect) {
    let (border, title) = if selected {
        ("card_border_selected", app.style("card_border_selected"))
    } else {
        ("card_border", app.style("card_title"))
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style(border))
        .title(Span::styled(card.title.clone(), title));
    f.render_widget(Paragraph::new(card.body.clone()).block(block), area);
}
