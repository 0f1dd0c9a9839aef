//! Card contents for the list grids.
//!
//! Cards are pure: they turn a record into styled lines for a given inner
//! width. The list widget owns borders, selection and layout.

use crate::api::{format_rating, Category, Series};
use crate::theme::StyleMap;
use crate::util::{clamp_lines, strip_control_chars, truncate_to_width};
use ratatui::text::{Line, Span};

/// Descriptions are clamped to this many lines on a card.
pub(super) const DESCRIPTION_LINES: usize = 3;

/// Text shown on a series card without an image URL.
const NO_IMAGE: &str = "no image";

/// Body lines for a category card, rendered under the name in the border title.
pub(super) fn category_body(
    category: &Category,
    width: usize,
    styles: &StyleMap,
) -> Vec<Line<'static>> {
    let mut lines = description_lines(category.description.as_deref(), width, styles);
    if let Some(url) = non_blank(category.image_url.as_deref()) {
        lines.push(image_line(url, width, styles));
    }
    lines
}

/// Height a category card needs: border, description, optional image line.
pub(super) fn category_height(category: &Category, width: usize) -> u16 {
    let description = description_height(category.description.as_deref(), width);
    let image = usize::from(non_blank(category.image_url.as_deref()).is_some());
    card_height(description + image)
}

/// Body lines for a series card.
pub(super) fn series_body(
    series: &Series,
    category_name: &str,
    width: usize,
    styles: &StyleMap,
) -> Vec<Line<'static>> {
    let mut lines = description_lines(series.description.as_deref(), width, styles);

    let rating = series
        .rating
        .map(format_rating)
        .unwrap_or_else(|| "-".to_string());
    lines.push(labeled("Released", &series.release_date.to_string(), width, styles));
    lines.push(labeled("Rating", &rating, width, styles));
    lines.push(labeled("Category", category_name, width, styles));
    lines.push(match non_blank(series.image_url.as_deref()) {
        Some(url) => image_line(url, width, styles),
        None => Line::from(Span::styled(NO_IMAGE, styles.resolve("card_muted"))),
    });
    lines
}

/// Series cards share one height so rows line up.
pub(super) fn series_height() -> u16 {
    card_height(DESCRIPTION_LINES + 4)
}

/// Card title, truncated to fit between the corners.
pub(super) fn title(text: &str, width: usize) -> String {
    let clean = strip_control_chars(text);
    format!(" {} ", truncate_to_width(&clean, width.saturating_sub(2)))
}

fn card_height(body_lines: usize) -> u16 {
    // +2 for borders
    u16::try_from(body_lines + 2).unwrap_or(u16::MAX)
}

fn description_height(description: Option<&str>, width: usize) -> usize {
    match non_blank(description) {
        Some(text) => clamp_lines(&strip_control_chars(text), width, DESCRIPTION_LINES).len(),
        None => 0,
    }
}

fn description_lines(description: Option<&str>, width: usize, styles: &StyleMap) -> Vec<Line<'static>> {
    let Some(text) = non_blank(description) else {
        return Vec::new();
    };
    let style = styles.resolve("card_text");
    clamp_lines(&strip_control_chars(text), width, DESCRIPTION_LINES)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, style)))
        .collect()
}

fn labeled(label: &str, value: &str, width: usize, styles: &StyleMap) -> Line<'static> {
    let label = format!("{}: ", label);
    let remaining = width.saturating_sub(label.len());
    let value = truncate_to_width(&strip_control_chars(value), remaining).into_owned();
    Line::from(vec![
        Span::styled(label, styles.resolve("card_label")),
        Span::styled(value, styles.resolve("card_text")),
    ])
}

fn image_line(url: &str, width: usize, styles: &StyleMap) -> Line<'static> {
    let url = truncate_to_width(&strip_control_chars(url), width).into_owned();
    Line::from(Span::styled(url, styles.resolve("card_image")))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
