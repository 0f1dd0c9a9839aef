//! Helper functions for UI operations.
//!
//! Background request plumbing shared by the input and event handlers.

use crate::api::CatalogClient;
use crate::app::{AppEvent, Command};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// Instead of the task silently disappearing (caught by Tokio's runtime but
/// not handled), panics are converted to `Err(String)` containing the panic
/// message.
///
/// # Returns
///
/// - `Ok(result)` if the future completes normally
/// - `Err(panic_message)` if the future panics
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

/// Runs `Command`s as background tasks.
///
/// Each task reports its `Outcome` on the app event channel, tagged with the
/// generation the command was issued under.
#[derive(Clone)]
pub(super) struct TaskSpawner {
    client: CatalogClient,
    tx: mpsc::Sender<AppEvent>,
}

impl TaskSpawner {
    pub(super) fn new(client: CatalogClient, tx: mpsc::Sender<AppEvent>) -> Self {
        Self { client, tx }
    }

    pub(super) fn spawn_all(&self, generation: u64, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.spawn(generation, command);
        }
    }

    pub(super) fn spawn(&self, generation: u64, command: Command) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let task = command.name();
        tracing::debug!(task, generation, "Spawning request task");

        tokio::spawn(async move {
            let event = match catch_task_panic(command.run(&client)).await {
                Ok(outcome) => AppEvent::Completed {
                    generation,
                    outcome,
                },
                Err(error) => {
                    tracing::error!(task, error = %error, "Request task panicked");
                    AppEvent::TaskPanicked { task, error }
                }
            };
            if let Err(e) = tx.send(event).await {
                tracing::warn!(error = %e, task, "Channel send failed (receiver dropped)");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Outcome;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_catch_task_panic_passes_result_through() {
        assert_eq!(catch_task_panic(async { 7 }).await, Ok(7));
    }

    #[tokio::test]
    async fn test_catch_task_panic_captures_message() {
        let result = catch_task_panic(async {
            if true {
                panic!("boom");
            }
        })
        .await;
        assert_eq!(result, Err("boom".to_string()));

        let owned = catch_task_panic(async {
            if true {
                panic!("{} failed", "decode");
            }
        })
        .await;
        assert_eq!(owned, Err("decode failed".to_string()));
    }

    #[tokio::test]
    async fn test_spawned_command_reports_with_generation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/categories/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let client =
            CatalogClient::new(&format!("{}/api", server.uri()), Duration::from_secs(5)).unwrap();
        let (tx, mut rx) = mpsc::channel(4);
        let spawner = TaskSpawner::new(client, tx);
        spawner.spawn_all(42, [Command::LoadCategories]);

        match rx.recv().await {
            Some(AppEvent::Completed {
                generation,
                outcome: Outcome::CategoriesLoaded(Ok(items)),
            }) => {
                assert_eq!(generation, 42);
                assert!(items.is_empty());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
