use crate::app::App;
use crate::keybindings::{Action as KbAction, Context as KbContext};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    // EDGE-001: Guard against zero-width/height areas
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = match &app.status_message {
        Some((msg, _)) => Cow::Borrowed(&**msg),
        None => Cow::Owned(default_hints(app)),
    };

    let paragraph = Paragraph::new(format!(" {}", text)).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}

/// Route path plus the global keys, using whatever keys are bound.
fn default_hints(app: &App) -> String {
    let mut text = app.route().path();
    for (action, label) in [
        (KbAction::ShowHelp, "help"),
        (KbAction::CycleTheme, "theme"),
        (KbAction::Quit, "quit"),
    ] {
        if let Some(key) = app.keybindings.key_hint(KbContext::Global, action) {
            text.push_str(&format!("  [{}] {}", key, label));
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::KeybindingRegistry;
    use crate::route::Route;
    use crate::theme::ThemeVariant;

    #[test]
    fn test_default_hints_show_route_and_keys() {
        let mut app = App::new("http://x", ThemeVariant::Dark, KeybindingRegistry::new());
        app.navigate(Route::EditCategory(5));
        let hints = default_hints(&app);
        assert!(hints.starts_with("/categories/edit/5"));
        assert!(hints.contains("[?] help"));
        assert!(hints.contains("[q] quit"));
    }
}
