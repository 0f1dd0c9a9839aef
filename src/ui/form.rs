//! Create/edit form rendering for categories and series.

use crate::api::EntityKind;
use crate::app::{App, Screen};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::screens::{
    CategoryField, CategoryForm, FieldOrder, FormMode, FormStatus, SeriesField, SeriesForm,
};
use crate::util::{display_width, strip_control_chars};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::borrow::Cow;
use unicode_width::UnicodeWidthChar;

use super::render::spinner;

/// Column width reserved for field labels.
const LABEL_WIDTH: usize = 14;
const FORM_MAX_WIDTH: u16 = 90;
const CURSOR: &str = "_";

pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let width = area.width.min(FORM_MAX_WIDTH);
    let area = Rect::new(area.x, area.y, width, area.height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    // -2 borders, -1 cursor
    let value_width = usize::from(width).saturating_sub(LABEL_WIDTH + 3);

    let (kind, mode, status, lines) = match &app.screen {
        Screen::CategoryForm(form) => (
            EntityKind::Category,
            form.mode,
            &form.status,
            category_lines(app, form, value_width),
        ),
        Screen::SeriesForm(form) => (
            EntityKind::Series,
            form.mode,
            &form.status,
            series_lines(app, form, value_width),
        ),
        _ => return,
    };

    f.render_widget(
        Paragraph::new(Span::styled(
            format!(" {} ", mode.heading(kind)),
            app.style("page_heading"),
        )),
        chunks[0],
    );
    render_banner(f, app, kind, status, chunks[1]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border_focused"));
    f.render_widget(Paragraph::new(lines).block(block), chunks[2]);

    render_hints(f, app, chunks[3]);
}

fn render_banner(f: &mut Frame, app: &App, kind: EntityKind, status: &FormStatus, area: Rect) {
    let line = if let Some(error) = &status.error {
        Line::from(Span::styled(format!(" {} ", error), app.style("error_banner")))
    } else if status.loading || status.saving {
        let text = if status.saving {
            "Saving...".to_string()
        } else {
            format!("Loading {}...", kind.noun())
        };
        Line::from(vec![
            Span::styled(format!(" {} ", spinner(app.spinner_frame)), app.style("spinner")),
            Span::styled(text, app.style("card_muted")),
        ])
    } else {
        return;
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_hints(f: &mut Frame, app: &App, area: Rect) {
    let spans: Vec<Span> = [
        (KbAction::NextField, "next field"),
        (KbAction::NextOption, "change option"),
        (KbAction::Submit, "save"),
        (KbAction::Cancel, "cancel"),
    ]
    .into_iter()
    .filter_map(|(action, label)| {
        app.keybindings
            .key_hint(KbContext::Form, action)
            .map(|key| Span::styled(format!(" [{}] {}", key, label), app.style("form_hint")))
    })
    .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn category_lines(app: &App, form: &CategoryForm, width: usize) -> Vec<Line<'static>> {
    let fields = &form.fields;
    let mut lines = Vec::with_capacity(CategoryField::ALL.len() + 2);
    for &field in CategoryField::ALL {
        let focused = form.focus == field;
        let value = match field {
            CategoryField::Name => &fields.name,
            CategoryField::Description => &fields.description,
            CategoryField::ImageUrl => &fields.image_url,
            CategoryField::Submit | CategoryField::Cancel => continue,
        };
        lines.push(text_line(app, field.label(), value, None, focused, width));
        if field == CategoryField::ImageUrl {
            lines.extend(preview_line(app, value, width));
        }
    }
    lines.push(Line::default());
    lines.push(button_line(
        app,
        form.mode,
        form.focus == CategoryField::Submit,
        form.focus == CategoryField::Cancel,
    ));
    lines
}

fn series_lines(app: &App, form: &SeriesForm, width: usize) -> Vec<Line<'static>> {
    let fields = &form.fields;
    let mut lines = Vec::with_capacity(SeriesField::ALL.len() + 2);
    for &field in SeriesField::ALL {
        let focused = form.focus == field;
        let (value, placeholder) = match field {
            SeriesField::Title => (&fields.title, None),
            SeriesField::Description => (&fields.description, None),
            SeriesField::ReleaseDate => (&fields.release_date, Some("YYYY-MM-DD")),
            SeriesField::Rating => (&fields.rating, Some("e.g. 8.5")),
            SeriesField::ImageUrl => (&fields.image_url, Some("https://...")),
            SeriesField::Category => {
                let label = if form.categories_loading {
                    Cow::Borrowed("Loading categories...")
                } else {
                    form.category_label()
                };
                lines.push(selector_line(app, field.label(), &label, focused, width));
                continue;
            }
            SeriesField::Submit | SeriesField::Cancel => continue,
        };
        lines.push(text_line(app, field.label(), value, placeholder, focused, width));
        if field == SeriesField::ImageUrl {
            lines.extend(preview_line(app, value, width));
        }
    }
    lines.push(Line::default());
    lines.push(button_line(
        app,
        form.mode,
        form.focus == SeriesField::Submit,
        form.focus == SeriesField::Cancel,
    ));
    lines
}

fn label_span(app: &App, label: &str, focused: bool) -> Span<'static> {
    let (marker, role) = if focused {
        ("> ", "form_label_focused")
    } else {
        ("  ", "form_label")
    };
    Span::styled(
        format!("{}{:<width$}", marker, label, width = LABEL_WIDTH - 2),
        app.style(role),
    )
}

fn text_line(
    app: &App,
    label: &str,
    value: &str,
    placeholder: Option<&str>,
    focused: bool,
    width: usize,
) -> Line<'static> {
    let mut spans = vec![label_span(app, label, focused)];
    if value.is_empty() && !focused {
        if let Some(placeholder) = placeholder {
            spans.push(Span::styled(placeholder.to_string(), app.style("form_hint")));
            return Line::from(spans);
        }
    }
    let role = if focused { "form_input_focused" } else { "form_input" };
    let mut shown = tail_to_width(&strip_control_chars(value), width);
    if focused {
        shown.push_str(CURSOR);
    }
    spans.push(Span::styled(shown, app.style(role)));
    Line::from(spans)
}

fn selector_line(app: &App, label: &str, value: &str, focused: bool, width: usize) -> Line<'static> {
    let role = if focused { "form_input_focused" } else { "form_input" };
    let value = tail_to_width(&strip_control_chars(value), width.saturating_sub(4));
    Line::from(vec![
        label_span(app, label, focused),
        Span::styled(format!("< {} >", value), app.style(role)),
    ])
}

/// Shown under the image URL field while it holds something.
fn preview_line(app: &App, url: &str, width: usize) -> Option<Line<'static>> {
    if url.trim().is_empty() {
        return None;
    }
    let url = tail_to_width(&strip_control_chars(url), width.saturating_sub(9));
    Some(Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH)),
        Span::styled("Preview: ", app.style("form_hint")),
        Span::styled(url, app.style("card_image")),
    ]))
}

fn button_line(app: &App, mode: FormMode, submit: bool, cancel: bool) -> Line<'static> {
    let style = |focused: bool| {
        app.style(if focused {
            "form_button_focused"
        } else {
            "form_button"
        })
    };
    Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH)),
        Span::styled(format!("[ {} ]", mode.submit_label()), style(submit)),
        Span::raw("  "),
        Span::styled("[ Cancel ]", style(cancel)),
    ])
}

/// Keeps the end of `s` visible, the part being typed.
fn tail_to_width(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    let budget = width.saturating_sub(1);
    let mut used = 0;
    let mut start = s.len();
    for (idx, c) in s.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        start = idx;
    }
    format!("…{}", &s[start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_to_width_keeps_end() {
        assert_eq!(tail_to_width("short", 10), "short");
        assert_eq!(tail_to_width("abcdefghij", 5), "…ghij");
        assert!(display_width(&tail_to_width("世界世界世界", 5)) <= 5);
    }
}
