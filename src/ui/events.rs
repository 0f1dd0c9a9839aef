//! Application event handling.
//!
//! Applies background request results to the mounted screen and spawns any
//! follow-up requests the transition asks for.

use crate::app::{App, AppEvent};

use super::helpers::TaskSpawner;

/// Handle application events from background tasks.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent, spawner: &TaskSpawner) {
    match event {
        AppEvent::Completed {
            generation,
            outcome,
        } => {
            let follow_up = app.apply(generation, outcome);
            // A save that navigated has already bumped the generation
            spawner.spawn_all(app.generation, follow_up);
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error, "Background task panicked");
            app.set_status(format!("Internal error in {} task", task));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, CatalogClient};
    use crate::app::{Outcome, Screen};
    use crate::keybindings::KeybindingRegistry;
    use crate::route::Route;
    use crate::theme::ThemeVariant;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn spawner() -> (TaskSpawner, mpsc::Receiver<AppEvent>) {
        let client = CatalogClient::new("http://127.0.0.1:9/api", Duration::from_secs(1)).unwrap();
        let (tx, rx) = mpsc::channel(8);
        (TaskSpawner::new(client, tx), rx)
    }

    #[tokio::test]
    async fn test_panicked_task_shows_status() {
        let mut app = App::new("http://x", ThemeVariant::Dark, KeybindingRegistry::new());
        let (spawner, _rx) = spawner();
        handle_app_event(
            &mut app,
            AppEvent::TaskPanicked {
                task: "load_series",
                error: "boom".to_string(),
            },
            &spawner,
        );
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert_eq!(msg, "Internal error in load_series task");
    }

    #[tokio::test]
    async fn test_completed_event_updates_screen() {
        let mut app = App::new("http://x", ThemeVariant::Dark, KeybindingRegistry::new());
        app.navigate(Route::Series);
        let (spawner, _rx) = spawner();
        let generation = app.generation;
        handle_app_event(
            &mut app,
            AppEvent::Completed {
                generation,
                outcome: Outcome::SeriesLoaded(Err(ApiError::HttpStatus(503))),
            },
            &spawner,
        );
        match &app.screen {
            Screen::Series(list) => {
                assert!(!list.loading);
                assert_eq!(list.error, Some("Could not load series."));
            }
            _ => panic!("expected series list"),
        }
    }
}
