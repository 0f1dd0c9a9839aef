//! Input handling for the TUI.
//!
//! This module processes keyboard input and dispatches to the appropriate
//! handler based on the mounted screen and any open overlay.

use crate::api::Entity;
use crate::app::{App, Command, Screen};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::screens::{FieldInput, FieldOrder, ListView, SeriesField};
use crate::util::validate_url_for_open;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};

use super::helpers::TaskSpawner;
use super::Action;

/// Main input dispatch function.
///
/// Overlays capture all keys while visible: help first, then the delete
/// confirmation. Otherwise the key goes to the mounted screen.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    spawner: &TaskSpawner,
) -> Result<Action> {
    if app.show_help {
        return Ok(handle_help_input(app, code));
    }

    if app.pending_confirm.is_some() {
        handle_confirm_input(app, code, spawner);
        return Ok(Action::Continue);
    }

    if app.screen.is_form() {
        Ok(handle_form_input(app, code, modifiers, spawner))
    } else {
        Ok(handle_list_input(app, code, modifiers, spawner))
    }
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::F(1) => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

/// y confirms the delete, n/Esc declines. Other keys are swallowed.
fn handle_confirm_input(app: &mut App, code: KeyCode, spawner: &TaskSpawner) {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(command) = app.confirm_delete() {
                spawner.spawn(app.generation, command);
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_confirm(),
        _ => {}
    }
}

/// Actions shared by every screen. Returns `None` if `action` is not one.
fn handle_global_action(app: &mut App, action: KbAction) -> Option<Action> {
    match action {
        KbAction::Quit => Some(Action::Quit),
        KbAction::ShowHelp => {
            app.show_help = true;
            app.help_scroll_offset = 0;
            Some(Action::Continue)
        }
        KbAction::CycleTheme => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
            Some(Action::Continue)
        }
        _ => None,
    }
}

// ============================================================================
// List screens
// ============================================================================

fn handle_list_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    spawner: &TaskSpawner,
) -> Action {
    let Some(action) = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::List)
    else {
        return Action::Continue;
    };
    if let Some(result) = handle_global_action(app, action) {
        return result;
    }

    let commands: Vec<Command> = match action {
        KbAction::Create => app.create_new(),
        KbAction::Edit => app.edit_selected(),
        KbAction::Delete => {
            app.request_delete();
            Vec::new()
        }
        KbAction::Refresh => app.refresh(),
        KbAction::SwitchList => app.switch_list(),
        KbAction::OpenImage => {
            open_selected_image(app);
            Vec::new()
        }
        motion => {
            let columns = app.list_columns.max(1);
            match &mut app.screen {
                Screen::Categories(list) => move_selection(list, motion, columns),
                Screen::Series(list) => move_selection(list, motion, columns),
                _ => {}
            }
            Vec::new()
        }
    };
    spawner.spawn_all(app.generation, commands);
    Action::Continue
}

/// Grid navigation: up/down move a whole row of cards.
fn move_selection<T: Entity>(list: &mut ListView<T>, action: KbAction, columns: usize) {
    let row = isize::try_from(columns).unwrap_or(1);
    match action {
        KbAction::NavDown => list.select_by(row),
        KbAction::NavUp => list.select_by(-row),
        KbAction::NavRight => list.select_next(),
        KbAction::NavLeft => list.select_prev(),
        KbAction::NavFirst => list.select_first(),
        KbAction::NavLast => list.select_last(),
        _ => {}
    }
}

fn open_selected_image(app: &mut App) {
    let Some(url) = app.selected_image_url().map(str::to_owned) else {
        app.set_status("Selected card has no image URL");
        return;
    };
    // SEC: Validate URL before open::that() to prevent command injection
    if let Err(e) = validate_url_for_open(&url) {
        app.set_status(e);
    } else if let Err(e) = open::that(&url) {
        tracing::warn!(error = %e, "Failed to open image URL");
        app.set_status(format!("Failed to open browser: {}", e));
    } else {
        app.set_status("Opening image...");
    }
}

// ============================================================================
// Form screens
// ============================================================================

/// What the focused form row does on Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusRole {
    Text,
    Selector,
    Submit,
    Cancel,
}

fn handle_form_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    spawner: &TaskSpawner,
) -> Action {
    let action = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Form);

    let Some(action) = action else {
        if let Some(input) = field_input_for(code, modifiers) {
            edit_focused(app, input);
        }
        return Action::Continue;
    };
    if let Some(result) = handle_global_action(app, action) {
        return result;
    }

    match action {
        KbAction::NextField => move_focus(app, true),
        KbAction::PrevField => move_focus(app, false),
        KbAction::NextOption => cycle_option(app, true),
        KbAction::PrevOption => cycle_option(app, false),
        KbAction::ClearField => edit_focused(app, FieldInput::Clear),
        KbAction::Submit => submit(app, spawner),
        KbAction::Cancel => cancel(app, spawner),
        KbAction::Activate => match focus_role(&app.screen) {
            FocusRole::Submit => submit(app, spawner),
            FocusRole::Cancel => cancel(app, spawner),
            FocusRole::Selector => cycle_option(app, true),
            FocusRole::Text => move_focus(app, true),
        },
        _ => {}
    }
    Action::Continue
}

/// Printable characters and Backspace edit the focused field.
fn field_input_for(code: KeyCode, modifiers: KeyModifiers) -> Option<FieldInput> {
    if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    match code {
        KeyCode::Char(c) => Some(FieldInput::Char(c)),
        KeyCode::Backspace => Some(FieldInput::Backspace),
        _ => None,
    }
}

fn focus_role(screen: &Screen) -> FocusRole {
    use crate::screens::CategoryField;
    match screen {
        Screen::CategoryForm(form) => match form.focus {
            CategoryField::Submit => FocusRole::Submit,
            CategoryField::Cancel => FocusRole::Cancel,
            _ => FocusRole::Text,
        },
        Screen::SeriesForm(form) => match form.focus {
            SeriesField::Submit => FocusRole::Submit,
            SeriesField::Cancel => FocusRole::Cancel,
            SeriesField::Category => FocusRole::Selector,
            _ => FocusRole::Text,
        },
        _ => FocusRole::Text,
    }
}

fn move_focus(app: &mut App, forward: bool) {
    match &mut app.screen {
        Screen::CategoryForm(form) => {
            form.focus = if forward { form.focus.next() } else { form.focus.prev() };
        }
        Screen::SeriesForm(form) => {
            form.focus = if forward { form.focus.next() } else { form.focus.prev() };
        }
        _ => {}
    }
}

fn cycle_option(app: &mut App, forward: bool) {
    if let Screen::SeriesForm(form) = &mut app.screen {
        if form.focus == SeriesField::Category && !form.status.loading {
            form.cycle_category(forward);
        }
    }
}

/// Field edits are ignored until an edit form has its record.
fn edit_focused(app: &mut App, input: FieldInput) {
    match &mut app.screen {
        Screen::CategoryForm(form) if !form.status.loading => form.input(input),
        Screen::SeriesForm(form) if !form.status.loading => form.input(input),
        _ => {}
    }
}

fn submit(app: &mut App, spawner: &TaskSpawner) {
    if let Some(command) = app.submit_form() {
        spawner.spawn(app.generation, command);
    }
}

fn cancel(app: &mut App, spawner: &TaskSpawner) {
    let commands = app.cancel_form();
    spawner.spawn_all(app.generation, commands);
}
