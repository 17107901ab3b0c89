//! Network dispatcher
//!
//! Executes [`Effect`]s on spawned tokio tasks and reports completions back
//! to the UI loop as [`AppEvent`]s. Each mutating effect finishes its request
//! before the completion event is sent, so the list refresh the app issues in
//! response is always sequenced after the mutation.

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use tp_core::api::ApiClient;
use tp_core::Error;

use crate::app::{AppEvent, Effect};

#[derive(Clone)]
pub struct Dispatcher {
    client: ApiClient,
    tx: UnboundedSender<AppEvent>,
}

impl Dispatcher {
    pub fn new(client: ApiClient, tx: UnboundedSender<AppEvent>) -> Self {
        Self { client, tx }
    }

    /// Run one effect to completion on its own task. Fire-and-forget from the
    /// caller's perspective; the outcome arrives as an [`AppEvent`].
    pub fn dispatch(&self, effect: Effect) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = match effect {
                Effect::CheckSession => {
                    let user = match client.me().await {
                        Ok(user) => Some(user),
                        Err(err) => {
                            // Treated as anonymous, never surfaced.
                            debug!(%err, "session check failed");
                            None
                        }
                    };
                    AppEvent::SessionChecked(user)
                }
                Effect::Login { email, password } => AppEvent::AuthFinished(
                    client.login(&email, &password).await.map_err(auth_message),
                ),
                Effect::Register {
                    name,
                    email,
                    password,
                } => AppEvent::AuthFinished(
                    client
                        .register(&name, &email, &password)
                        .await
                        .map_err(auth_message),
                ),
                Effect::Logout => {
                    if let Err(err) = client.logout().await {
                        warn!(%err, "logout request failed");
                    }
                    AppEvent::LoggedOut
                }
                Effect::FetchTasks { generation, status } => AppEvent::TasksFetched {
                    generation,
                    result: client.list_tasks(status).await,
                },
                Effect::CreateTask { draft } => match client.create_task(&draft).await {
                    Ok(_) => AppEvent::TaskSaved(true),
                    Err(err) => {
                        warn!(%err, "create failed");
                        AppEvent::TaskSaved(false)
                    }
                },
                Effect::UpdateTask { id, draft } => match client.update_task(id, &draft).await {
                    Ok(_) => AppEvent::TaskSaved(true),
                    Err(err) => {
                        warn!(%err, task = id, "update failed");
                        AppEvent::TaskSaved(false)
                    }
                },
                Effect::DeleteTask { id } => {
                    if let Err(err) = client.delete_task(id).await {
                        warn!(%err, task = id, "delete failed");
                    }
                    AppEvent::TaskMutated
                }
                Effect::CompleteTask { id } => {
                    if let Err(err) = client.complete_task(id).await {
                        warn!(%err, task = id, "complete failed");
                    }
                    AppEvent::TaskMutated
                }
            };
            // Send fails only during shutdown.
            let _ = tx.send(event);
        });
    }
}

fn auth_message(err: Error) -> String {
    match err {
        Error::Api(message) => message,
        _ => "unknown error".to_string(),
    }
}
