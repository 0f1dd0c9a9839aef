use crate::api::{
    ApiError, CatalogClient, Category, CategoryPayload, Entity, EntityId, EntityKind, Series,
    SeriesPayload,
};
use crate::keybindings::KeybindingRegistry;
use crate::route::Route;
use crate::screens::{CategoryForm, FormMode, ListView, SeriesForm};
use crate::theme::{StyleMap, ThemeVariant};
use ratatui::style::Style;
use std::borrow::Cow;
use std::collections::HashMap;
use tokio::time::Instant;

/// How long a status bar message stays visible.
const STATUS_TTL_SECS: u64 = 3;

// ============================================================================
// Confirmation Dialog
// ============================================================================

/// Pending confirmation for a destructive operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteCategory { id: EntityId, name: String },
    DeleteSeries { id: EntityId, title: String },
}

impl ConfirmAction {
    /// Confirmation for deleting `item`, labelled with its name or title.
    pub fn delete<T: Entity>(item: &T) -> Self {
        let id = item.id();
        let label = item.label().to_string();
        match T::KIND {
            EntityKind::Category => Self::DeleteCategory { id, name: label },
            EntityKind::Series => Self::DeleteSeries { id, title: label },
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::DeleteCategory { .. } => EntityKind::Category,
            Self::DeleteSeries { .. } => EntityKind::Series,
        }
    }

    pub fn message(&self) -> &'static str {
        self.kind().confirm_delete_message()
    }

    /// Name of the record, shown under the question.
    pub fn label(&self) -> &str {
        match self {
            Self::DeleteCategory { name, .. } => name,
            Self::DeleteSeries { title, .. } => title,
        }
    }
}

// ============================================================================
// Screens
// ============================================================================

/// The mounted screen and the state it owns.
#[derive(Debug, Clone)]
pub enum Screen {
    Categories(ListView<Category>),
    CategoryForm(CategoryForm),
    Series(ListView<Series>),
    SeriesForm(SeriesForm),
}

impl Screen {
    /// Fresh state for `route`, plus the requests its mount issues.
    fn mount(route: Route) -> (Self, Vec<Command>) {
        match route {
            Route::Categories => (
                Self::Categories(ListView::mounting()),
                vec![Command::LoadCategories],
            ),
            Route::Series => (Self::Series(ListView::mounting()), vec![Command::LoadSeries]),
            Route::NewCategory | Route::EditCategory(_) => {
                let mode = FormMode::from_id(edit_id(route));
                let commands = mode.id().map(Command::LoadCategory).into_iter().collect();
                (Self::CategoryForm(CategoryForm::mounting(mode)), commands)
            }
            Route::NewSeries | Route::EditSeries(_) => {
                let mode = FormMode::from_id(edit_id(route));
                let mut commands = vec![Command::LoadCategoryOptions];
                commands.extend(mode.id().map(Command::LoadSeriesItem));
                (Self::SeriesForm(SeriesForm::mounting(mode)), commands)
            }
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Self::Categories(_) => Route::Categories,
            Self::Series(_) => Route::Series,
            Self::CategoryForm(form) => Route::form_for(EntityKind::Category, form.mode.id()),
            Self::SeriesForm(form) => Route::form_for(EntityKind::Series, form.mode.id()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.route().kind()
    }

    pub fn is_form(&self) -> bool {
        matches!(self, Self::CategoryForm(_) | Self::SeriesForm(_))
    }

    /// True while any request this screen issued is pending.
    pub fn is_busy(&self) -> bool {
        match self {
            Self::Categories(list) => list.loading,
            Self::Series(list) => list.loading,
            Self::CategoryForm(form) => form.status.is_busy(),
            Self::SeriesForm(form) => form.status.is_busy() || form.categories_loading,
        }
    }
}

fn edit_id(route: Route) -> Option<EntityId> {
    match route {
        Route::EditCategory(id) | Route::EditSeries(id) => Some(id),
        _ => None,
    }
}

// ============================================================================
// Commands and Outcomes
// ============================================================================

/// A request a screen wants issued. Each runs as its own background task.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadCategories,
    LoadSeries,
    LoadCategory(EntityId),
    LoadSeriesItem(EntityId),
    LoadCategoryOptions,
    DeleteCategory(EntityId),
    DeleteSeries(EntityId),
    SaveCategory {
        id: Option<EntityId>,
        payload: CategoryPayload,
    },
    SaveSeries {
        id: Option<EntityId>,
        payload: SeriesPayload,
    },
}

impl Command {
    /// Task name for logs and panic reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadCategories => "load_categories",
            Self::LoadSeries => "load_series",
            Self::LoadCategory(_) => "load_category",
            Self::LoadSeriesItem(_) => "load_series_item",
            Self::LoadCategoryOptions => "load_category_options",
            Self::DeleteCategory(_) => "delete_category",
            Self::DeleteSeries(_) => "delete_series",
            Self::SaveCategory { .. } => "save_category",
            Self::SaveSeries { .. } => "save_series",
        }
    }

    pub async fn run(self, client: &CatalogClient) -> Outcome {
        match self {
            Self::LoadCategories => Outcome::CategoriesLoaded(client.list_categories().await),
            Self::LoadSeries => Outcome::SeriesLoaded(client.list_series().await),
            Self::LoadCategory(id) => Outcome::CategoryLoaded(client.get_category(id).await),
            Self::LoadSeriesItem(id) => Outcome::SeriesItemLoaded(client.get_series(id).await),
            Self::LoadCategoryOptions => {
                Outcome::CategoryOptionsLoaded(client.list_categories().await)
            }
            Self::DeleteCategory(id) => Outcome::CategoryDeleted(client.delete_category(id).await),
            Self::DeleteSeries(id) => Outcome::SeriesDeleted(client.delete_series(id).await),
            Self::SaveCategory {
                id: Some(id),
                payload,
            } => Outcome::CategorySaved(client.update_category(id, &payload).await),
            Self::SaveCategory { id: None, payload } => {
                Outcome::CategorySaved(client.create_category(&payload).await)
            }
            Self::SaveSeries {
                id: Some(id),
                payload,
            } => Outcome::SeriesSaved(client.update_series(id, &payload).await),
            Self::SaveSeries { id: None, payload } => {
                Outcome::SeriesSaved(client.create_series(&payload).await)
            }
        }
    }
}

/// Result of a finished `Command`.
#[derive(Debug)]
pub enum Outcome {
    CategoriesLoaded(Result<Vec<Category>, ApiError>),
    SeriesLoaded(Result<Vec<Series>, ApiError>),
    CategoryLoaded(Result<Category, ApiError>),
    SeriesItemLoaded(Result<Series, ApiError>),
    CategoryOptionsLoaded(Result<Vec<Category>, ApiError>),
    CategoryDeleted(Result<(), ApiError>),
    SeriesDeleted(Result<(), ApiError>),
    CategorySaved(Result<(), ApiError>),
    SeriesSaved(Result<(), ApiError>),
}

/// Events from background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// A request finished. `generation` is the mount it was issued under.
    Completed { generation: u64, outcome: Outcome },
    /// A background task panicked.
    ///
    /// Sent by `catch_task_panic` wrappers so the UI can surface the failure
    /// in the status bar instead of silently losing the task.
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state
pub struct App {
    // Theme
    pub theme_variant: ThemeVariant,
    /// Active style map for all UI rendering.
    pub theme: StyleMap,

    pub keybindings: KeybindingRegistry,

    /// API base URL, shown in the header.
    pub api_base_url: String,

    pub screen: Screen,

    /// Incremented on every mount. Results tagged with an older value
    /// belong to a screen that is gone and are dropped.
    pub generation: u64,

    /// Category names seen in any category response, used to label series
    /// whose category arrived as a bare id.
    pub category_names: HashMap<EntityId, String>,

    /// Cards per row in the last rendered list grid, for vertical navigation.
    pub list_columns: usize,

    /// Pending confirmation dialog for destructive operations.
    ///
    /// When set, the UI renders a confirmation overlay and input is routed
    /// to the confirmation handler instead of normal dispatch.
    pub pending_confirm: Option<ConfirmAction>,

    /// Whether the help overlay is currently displayed.
    pub show_help: bool,
    /// Scroll offset in the help screen for long keybinding lists.
    pub help_scroll_offset: usize,

    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Set whenever state changes; the event loop only draws when true.
    pub needs_redraw: bool,

    /// Current frame of the loading spinner animation.
    ///
    /// Incremented by the tick handler while a request is pending.
    pub spinner_frame: usize,
}

impl App {
    pub fn new(
        api_base_url: impl Into<String>,
        theme_variant: ThemeVariant,
        keybindings: KeybindingRegistry,
    ) -> Self {
        Self {
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            keybindings,
            api_base_url: api_base_url.into(),
            screen: Screen::Categories(ListView::mounting()),
            generation: 0,
            category_names: HashMap::new(),
            list_columns: 1,
            pending_confirm: None,
            show_help: false,
            help_scroll_offset: 0,
            status_message: None,
            needs_redraw: true,
            spinner_frame: 0,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Switch to a different theme variant at runtime.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant. Returns its name for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    pub fn route(&self) -> Route {
        self.screen.route()
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Mount the screen for `route`, discarding the current one.
    ///
    /// Returns the requests the new screen issues on mount.
    pub fn navigate(&mut self, route: Route) -> Vec<Command> {
        self.generation = self.generation.wrapping_add(1);
        self.pending_confirm = None;
        let (screen, commands) = Screen::mount(route);
        self.screen = screen;
        self.needs_redraw = true;
        tracing::debug!(route = %route, generation = self.generation, "Mounted screen");
        commands
    }

    /// Create navigation from a list screen.
    pub fn create_new(&mut self) -> Vec<Command> {
        let kind = self.screen.kind();
        self.navigate(Route::form_for(kind, None))
    }

    /// Edit navigation for the selected card.
    pub fn edit_selected(&mut self) -> Vec<Command> {
        let selected = match &self.screen {
            Screen::Categories(list) => list.selected_id(),
            Screen::Series(list) => list.selected_id(),
            _ => None,
        };
        match selected {
            Some(id) => self.navigate(Route::form_for(self.screen.kind(), Some(id))),
            None => Vec::new(),
        }
    }

    /// Jump between the two list screens.
    pub fn switch_list(&mut self) -> Vec<Command> {
        let target = match self.screen.kind() {
            EntityKind::Category => Route::Series,
            EntityKind::Series => Route::Categories,
        };
        self.navigate(target)
    }

    /// Re-run read-all on the mounted list screen.
    pub fn refresh(&mut self) -> Vec<Command> {
        self.needs_redraw = true;
        match &mut self.screen {
            Screen::Categories(list) => {
                list.begin_reload();
                vec![Command::LoadCategories]
            }
            Screen::Series(list) => {
                list.begin_reload();
                vec![Command::LoadSeries]
            }
            _ => Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Deletion
    // ------------------------------------------------------------------

    /// Ask for confirmation before deleting the selected card.
    pub fn request_delete(&mut self) {
        let action = match &self.screen {
            Screen::Categories(list) => list.selected_item().map(ConfirmAction::delete),
            Screen::Series(list) => list.selected_item().map(ConfirmAction::delete),
            _ => None,
        };
        if action.is_some() {
            self.pending_confirm = action;
            self.needs_redraw = true;
        }
    }

    /// The user accepted the confirmation: issue delete-by-id.
    pub fn confirm_delete(&mut self) -> Option<Command> {
        let action = self.pending_confirm.take()?;
        self.needs_redraw = true;
        self.set_status(format!("Deleting {}...", action.label()));
        Some(match action {
            ConfirmAction::DeleteCategory { id, .. } => Command::DeleteCategory(id),
            ConfirmAction::DeleteSeries { id, .. } => Command::DeleteSeries(id),
        })
    }

    /// The user declined: nothing is sent.
    pub fn cancel_confirm(&mut self) {
        if self.pending_confirm.take().is_some() {
            self.set_status("Cancelled");
        }
    }

    // ------------------------------------------------------------------
    // Forms
    // ------------------------------------------------------------------

    /// Validate and build the create/update request for the mounted form.
    pub fn submit_form(&mut self) -> Option<Command> {
        self.needs_redraw = true;
        match &mut self.screen {
            Screen::CategoryForm(form) => {
                let payload = form.begin_submit()?;
                Some(Command::SaveCategory {
                    id: form.mode.id(),
                    payload,
                })
            }
            Screen::SeriesForm(form) => {
                let payload = form.begin_submit()?;
                Some(Command::SaveSeries {
                    id: form.mode.id(),
                    payload,
                })
            }
            _ => None,
        }
    }

    /// Cancel returns to the list without a request.
    pub fn cancel_form(&mut self) -> Vec<Command> {
        let kind = self.screen.kind();
        self.navigate(Route::list_for(kind))
    }

    // ------------------------------------------------------------------
    // Results
    // ------------------------------------------------------------------

    /// Apply a finished request to the mounted screen.
    ///
    /// Returns any follow-up requests (reload after delete, the list mount
    /// after a successful save).
    pub fn apply(&mut self, generation: u64, outcome: Outcome) -> Vec<Command> {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                outcome = ?std::mem::discriminant(&outcome),
                "Dropping stale result"
            );
            return Vec::new();
        }
        self.needs_redraw = true;

        match outcome {
            Outcome::CategoriesLoaded(result) | Outcome::CategoryOptionsLoaded(result) => {
                if let Ok(categories) = &result {
                    self.remember_category_names(categories);
                }
                match &mut self.screen {
                    Screen::Categories(list) => list.apply_loaded(result),
                    Screen::SeriesForm(form) => form.apply_options_loaded(result),
                    _ => tracing::debug!("Category list result with no consumer"),
                }
            }
            Outcome::SeriesLoaded(result) => {
                if let Screen::Series(list) = &mut self.screen {
                    list.apply_loaded(result);
                }
            }
            Outcome::CategoryLoaded(result) => {
                if let Screen::CategoryForm(form) = &mut self.screen {
                    form.apply_loaded(result);
                }
            }
            Outcome::SeriesItemLoaded(result) => {
                if let Screen::SeriesForm(form) = &mut self.screen {
                    form.apply_loaded(result);
                }
            }
            Outcome::CategoryDeleted(result) => {
                if let Screen::Categories(list) = &mut self.screen {
                    match result {
                        Ok(()) => {
                            self.status_message = None;
                            list.begin_reload();
                            return vec![Command::LoadCategories];
                        }
                        Err(e) => list.apply_delete_failed(&e),
                    }
                }
            }
            Outcome::SeriesDeleted(result) => {
                if let Screen::Series(list) = &mut self.screen {
                    match result {
                        Ok(()) => {
                            self.status_message = None;
                            list.begin_reload();
                            return vec![Command::LoadSeries];
                        }
                        Err(e) => list.apply_delete_failed(&e),
                    }
                }
            }
            Outcome::CategorySaved(result) => {
                if let Screen::CategoryForm(form) = &mut self.screen {
                    match result {
                        Ok(()) => return self.navigate(Route::Categories),
                        Err(e) => form.apply_save_failed(&e),
                    }
                }
            }
            Outcome::SeriesSaved(result) => {
                if let Screen::SeriesForm(form) = &mut self.screen {
                    match result {
                        Ok(()) => return self.navigate(Route::Series),
                        Err(e) => form.apply_save_failed(&e),
                    }
                }
            }
        }
        Vec::new()
    }

    fn remember_category_names(&mut self, categories: &[Category]) {
        for category in categories {
            self.category_names
                .insert(category.id, category.name.clone());
        }
    }

    /// Display name for a series' category: embedded name, then any name
    /// seen in a category response, then `#<id>`.
    pub fn category_display_name<'a>(&'a self, series: &'a Series) -> Cow<'a, str> {
        if let Some(name) = series.category.name.as_deref() {
            return Cow::Borrowed(name);
        }
        match self.category_names.get(&series.category.id) {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Owned(format!("#{}", series.category.id)),
        }
    }

    /// Image URL of the selected card, if it has one.
    pub fn selected_image_url(&self) -> Option<&str> {
        match &self.screen {
            Screen::Categories(list) => list.selected_item().and_then(Entity::image_url),
            Screen::Series(list) => list.selected_item().and_then(Entity::image_url),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Status bar
    // ------------------------------------------------------------------

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear status message if expired.
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}
