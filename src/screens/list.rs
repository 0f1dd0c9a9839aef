use crate::api::{ApiError, Entity, EntityId};

/// View-model for a list screen: the fetched collection plus request state.
///
/// The collection is owned exclusively by this view and replaced wholesale on
/// every successful read-all; nothing is removed optimistically.
#[derive(Debug, Clone)]
pub struct ListView<T: Entity> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<&'static str>,
    pub selected: usize,
}

impl<T: Entity> ListView<T> {
    /// State right after mount: nothing loaded yet, read-all in flight.
    pub fn mounting() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
            selected: 0,
        }
    }

    /// Marks a read-all as pending (refresh or post-delete reload).
    pub fn begin_reload(&mut self) {
        self.loading = true;
    }

    pub fn apply_loaded(&mut self, result: Result<Vec<T>, ApiError>) {
        self.loading = false;
        match result {
            Ok(items) => {
                tracing::debug!(kind = %T::KIND, count = items.len(), "List loaded");
                self.items = items;
                self.error = None;
                self.clamp_selection();
            }
            Err(e) => {
                tracing::warn!(kind = %T::KIND, error = %e, "Failed to load list");
                self.error = Some(T::KIND.load_failed_message());
            }
        }
    }

    /// A failed delete leaves the displayed collection untouched.
    pub fn apply_delete_failed(&mut self, error: &ApiError) {
        tracing::warn!(kind = %T::KIND, error = %error, "Failed to delete");
        self.error = Some(T::KIND.delete_failed_message());
    }

    /// True when the "no items" message should replace the card grid.
    pub fn shows_empty_message(&self) -> bool {
        !self.loading && self.items.is_empty()
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub fn selected_id(&self) -> Option<EntityId> {
        self.selected_item().map(Entity::id)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves by `step` cards (a grid row), stopping at either end.
    pub fn select_by(&mut self, step: isize) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        self.selected = self.selected.saturating_add_signed(step).min(last);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }
}
