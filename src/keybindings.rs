//! Keybinding registry: maps actions to key events with config overrides.
//!
//! Bindings are grouped by dispatch context. List screens fall back to the
//! global bindings. Form screens fall back only for non-character keys, so
//! letters typed into a field never trigger global actions.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    ShowHelp,
    CycleTheme,

    // List screens
    NavDown,
    NavUp,
    NavLeft,
    NavRight,
    NavFirst,
    NavLast,
    Create,
    Edit,
    Delete,
    Refresh,
    SwitchList,
    OpenImage,

    // Form screens
    NextField,
    PrevField,
    NextOption,
    PrevOption,
    Activate,
    Submit,
    Cancel,
    ClearField,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::ShowHelp => "Show help",
            Self::CycleTheme => "Cycle theme",
            Self::NavDown => "Select card below",
            Self::NavUp => "Select card above",
            Self::NavLeft => "Select previous card",
            Self::NavRight => "Select next card",
            Self::NavFirst => "Select first card",
            Self::NavLast => "Select last card",
            Self::Create => "Create new",
            Self::Edit => "Edit selected",
            Self::Delete => "Delete selected",
            Self::Refresh => "Reload list",
            Self::SwitchList => "Switch between categories and series",
            Self::OpenImage => "Open image URL in browser",
            Self::NextField => "Next field",
            Self::PrevField => "Previous field",
            Self::NextOption => "Next category option",
            Self::PrevOption => "Previous category option",
            Self::Activate => "Press focused button / next field",
            Self::Submit => "Save",
            Self::Cancel => "Cancel and return to list",
            Self::ClearField => "Clear focused field",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context. Determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    List,
    Form,
}

impl Context {
    /// Section title on the help screen.
    pub fn title(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::List => "List screens",
            Self::Form => "Form screens",
        }
    }
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Terminals report SHIFT alongside uppercase letters and BackTab
    /// inconsistently; the registry stores both without it.
    fn normalized(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let modifiers = match code {
            KeyCode::Char(_) | KeyCode::BackTab => modifiers.difference(KeyModifiers::SHIFT),
            _ => modifiers,
        };
        Self::new(code, modifiers)
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "BackTab", "Up", "Down", "Delete"
/// - Modifier combos: "Ctrl+s", "Ctrl+u"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let rest = rest.trim();
        if rest.chars().count() == 1 {
            let c = rest.chars().next()?;
            return Some(KeySpec::ctrl(c));
        }
        return None;
    }

    // Named keys (case-insensitive)
    match s.to_lowercase().as_str() {
        "enter" | "return" => return Some(KeySpec::plain(KeyCode::Enter)),
        "esc" | "escape" => return Some(KeySpec::plain(KeyCode::Esc)),
        "tab" => return Some(KeySpec::plain(KeyCode::Tab)),
        "backtab" | "shift+tab" => return Some(KeySpec::plain(KeyCode::BackTab)),
        "up" => return Some(KeySpec::plain(KeyCode::Up)),
        "down" => return Some(KeySpec::plain(KeyCode::Down)),
        "left" => return Some(KeySpec::plain(KeyCode::Left)),
        "right" => return Some(KeySpec::plain(KeyCode::Right)),
        "home" => return Some(KeySpec::plain(KeyCode::Home)),
        "end" => return Some(KeySpec::plain(KeyCode::End)),
        "delete" | "del" => return Some(KeySpec::plain(KeyCode::Delete)),
        "backspace" => return Some(KeySpec::plain(KeyCode::Backspace)),
        "space" => return Some(KeySpec::plain(KeyCode::Char(' '))),
        _ => {}
    }

    // Function keys
    if s.starts_with('F') || s.starts_with('f') {
        if let Ok(n) = s[1..].parse::<u8>() {
            if (1..=12).contains(&n) {
                return Some(KeySpec::plain(KeyCode::F(n)));
            }
        }
    }

    if s.chars().count() == 1 {
        let c = s.chars().next()?;
        return Some(KeySpec::plain(KeyCode::Char(c)));
    }

    None
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// Lookup is O(1) via HashMap. The same key can map to different actions in
/// different contexts.
#[derive(Debug, Clone)]
pub struct KeybindingRegistry {
    /// Primary lookup: (Context, KeySpec) -> Action
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings for help screen enumeration
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        use KeyCode::*;

        // === Global ===
        self.bind(Context::Global, KeySpec::plain(Char('q')), Action::Quit);
        self.bind(Context::Global, KeySpec::ctrl('c'), Action::Quit);
        self.bind(Context::Global, KeySpec::plain(Char('?')), Action::ShowHelp);
        self.bind(Context::Global, KeySpec::plain(F(1)), Action::ShowHelp);
        self.bind(Context::Global, KeySpec::plain(Char('T')), Action::CycleTheme);

        // === List screens ===
        self.bind(Context::List, KeySpec::plain(Char('j')), Action::NavDown);
        self.bind(Context::List, KeySpec::plain(Down), Action::NavDown);
        self.bind(Context::List, KeySpec::plain(Char('k')), Action::NavUp);
        self.bind(Context::List, KeySpec::plain(Up), Action::NavUp);
        self.bind(Context::List, KeySpec::plain(Char('h')), Action::NavLeft);
        self.bind(Context::List, KeySpec::plain(Left), Action::NavLeft);
        self.bind(Context::List, KeySpec::plain(Char('l')), Action::NavRight);
        self.bind(Context::List, KeySpec::plain(Right), Action::NavRight);
        self.bind(Context::List, KeySpec::plain(Char('g')), Action::NavFirst);
        self.bind(Context::List, KeySpec::plain(Home), Action::NavFirst);
        self.bind(Context::List, KeySpec::plain(Char('G')), Action::NavLast);
        self.bind(Context::List, KeySpec::plain(End), Action::NavLast);

        self.bind(Context::List, KeySpec::plain(Char('n')), Action::Create);
        self.bind(Context::List, KeySpec::plain(Char('e')), Action::Edit);
        self.bind(Context::List, KeySpec::plain(Enter), Action::Edit);
        self.bind(Context::List, KeySpec::plain(Char('d')), Action::Delete);
        self.bind(Context::List, KeySpec::plain(Delete), Action::Delete);
        self.bind(Context::List, KeySpec::plain(Char('r')), Action::Refresh);
        self.bind(Context::List, KeySpec::plain(Tab), Action::SwitchList);
        self.bind(Context::List, KeySpec::plain(Char('o')), Action::OpenImage);

        // === Form screens ===
        self.bind(Context::Form, KeySpec::plain(Tab), Action::NextField);
        self.bind(Context::Form, KeySpec::plain(Down), Action::NextField);
        self.bind(Context::Form, KeySpec::plain(BackTab), Action::PrevField);
        self.bind(Context::Form, KeySpec::plain(Up), Action::PrevField);
        self.bind(Context::Form, KeySpec::plain(Right), Action::NextOption);
        self.bind(Context::Form, KeySpec::plain(Left), Action::PrevOption);
        self.bind(Context::Form, KeySpec::plain(Enter), Action::Activate);
        self.bind(Context::Form, KeySpec::ctrl('s'), Action::Submit);
        self.bind(Context::Form, KeySpec::plain(Esc), Action::Cancel);
        self.bind(Context::Form, KeySpec::ctrl('u'), Action::ClearField);
        self.bind(Context::Form, KeySpec::ctrl('c'), Action::Quit);
    }

    /// Apply user overrides from config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "nav_down").
    /// Values are key strings (e.g., "q", "Ctrl+s", "F5").
    ///
    /// Returns a list of warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };

            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts_for_action: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();
            contexts_for_action.dedup();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts_for_action {
                self.bind(ctx, key, action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Look up the action for a given key in a given context.
    ///
    /// List context falls back to Global. Form context skips the fallback for
    /// plain characters, which stay available for typing.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::normalized(code, modifiers);

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }

        let falls_back = match context {
            Context::Global => false,
            Context::List => true,
            Context::Form => {
                !matches!(key.code, KeyCode::Char(_))
                    || key.modifiers.contains(KeyModifiers::CONTROL)
            }
        };
        if falls_back {
            return self.lookup.get(&(Context::Global, key)).copied();
        }

        None
    }

    /// All bindings for the help screen, in registration order.
    ///
    /// Returns (context, key_display_string, action, description) tuples.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }

    /// First key bound to `action` in `context`, for status bar hints.
    pub fn key_hint(&self, context: Context, action: Action) -> Option<String> {
        self.bindings
            .iter()
            .find(|(c, _, a)| *c == context && *a == action)
            .map(|(_, key, _)| format_key(key))
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "show_help" | "showhelp" | "help" => Some(Action::ShowHelp),
        "cycle_theme" | "cycletheme" | "theme" => Some(Action::CycleTheme),
        "nav_down" | "navdown" | "down" => Some(Action::NavDown),
        "nav_up" | "navup" | "up" => Some(Action::NavUp),
        "nav_left" | "navleft" | "left" => Some(Action::NavLeft),
        "nav_right" | "navright" | "right" => Some(Action::NavRight),
        "nav_first" | "navfirst" | "first" => Some(Action::NavFirst),
        "nav_last" | "navlast" | "last" => Some(Action::NavLast),
        "create" | "new" => Some(Action::Create),
        "edit" => Some(Action::Edit),
        "delete" => Some(Action::Delete),
        "refresh" | "reload" => Some(Action::Refresh),
        "switch_list" | "switchlist" => Some(Action::SwitchList),
        "open_image" | "openimage" | "open" => Some(Action::OpenImage),
        "next_field" | "nextfield" => Some(Action::NextField),
        "prev_field" | "prevfield" => Some(Action::PrevField),
        "next_option" | "nextoption" => Some(Action::NextOption),
        "prev_option" | "prevoption" => Some(Action::PrevOption),
        "activate" => Some(Action::Activate),
        "submit" | "save" => Some(Action::Submit),
        "cancel" => Some(Action::Cancel),
        "clear_field" | "clearfield" => Some(Action::ClearField),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
