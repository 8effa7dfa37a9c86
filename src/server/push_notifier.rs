//! Push notifier — webhook dispatch of task snapshots to client-registered URLs.
//!
//! Mirrors Python SDK's `PushNotificationSender` / `BasePushNotificationSender`
//! from `a2a.server.tasks.push_notification_sender`, and the config storage
//! split out into `PushNotificationConfigStore`.
//!
//! Two responsibilities live here, matching the Python SDK's split:
//! - [`TaskPushNotificationConfigStore`] — CRUD for per-task webhook configs.
//! - [`PushNotifier`] — `send_notification(task)`, which looks up the configs
//!   for a task and POSTs the serialized task to each one. Delivery failures
//!   are logged and never propagate to the caller — a flaky webhook must not
//!   fail the underlying A2A request.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::A2AResult;
use crate::types::{PushNotificationAuthenticationInfo, Task, TaskPushNotificationConfig};

/// Stores push notification configs keyed by task ID.
///
/// A single task may have more than one registered config (e.g. the Python
/// SDK keys by `(task_id, config_id)`), so [`TaskPushNotificationConfigStore::get`]
/// returns every config registered for the task.
#[async_trait]
pub trait TaskPushNotificationConfigStore: Send + Sync {
    /// Register or replace a push notification config for a task.
    ///
    /// If `config.id` is absent, one is treated as the default config for
    /// the task (matching the Python SDK's single-default convention).
    async fn set(&self, config: TaskPushNotificationConfig) -> A2AResult<TaskPushNotificationConfig>;

    /// Retrieve the configs registered for a task.
    async fn get(&self, task_id: &str) -> A2AResult<Vec<TaskPushNotificationConfig>>;

    /// List configs for a task (alias of `get`, matching the `tasks/pushNotificationConfig/list` method name).
    async fn list(&self, task_id: &str) -> A2AResult<Vec<TaskPushNotificationConfig>> {
        self.get(task_id).await
    }

    /// Delete a specific config by id, or all configs for the task if `config_id` is `None`.
    async fn delete(&self, task_id: &str, config_id: Option<&str>) -> A2AResult<()>;
}

/// In-memory implementation of [`TaskPushNotificationConfigStore`].
#[derive(Debug, Default)]
pub struct InMemoryTaskPushNotificationConfigStore {
    configs: RwLock<HashMap<String, Vec<TaskPushNotificationConfig>>>,
}

impl InMemoryTaskPushNotificationConfigStore {
    /// Create a new empty config store.
    pub fn new() -> Self {
        Self {
            configs: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl TaskPushNotificationConfigStore for InMemoryTaskPushNotificationConfigStore {
    async fn set(
        &self,
        config: TaskPushNotificationConfig,
    ) -> A2AResult<TaskPushNotificationConfig> {
        let mut configs = self.configs.write().await;
        let entry = configs.entry(config.task_id.clone()).or_default();

        let config_id = config.id.clone();
        match config_id {
            Some(ref id) if entry.iter().any(|c| c.id.as_deref() == Some(id)) => {
                let idx = entry
                    .iter()
                    .position(|c| c.id.as_deref() == Some(id.as_str()))
                    .unwrap();
                entry[idx] = config.clone();
            }
            _ => entry.push(config.clone()),
        }

        debug!(task_id = %config.task_id, "Push notification config registered");
        Ok(config)
    }

    async fn get(&self, task_id: &str) -> A2AResult<Vec<TaskPushNotificationConfig>> {
        let configs = self.configs.read().await;
        Ok(configs.get(task_id).cloned().unwrap_or_default())
    }

    async fn delete(&self, task_id: &str, config_id: Option<&str>) -> A2AResult<()> {
        let mut configs = self.configs.write().await;
        match config_id {
            Some(id) => {
                if let Some(entry) = configs.get_mut(task_id) {
                    entry.retain(|c| c.id.as_deref() != Some(id));
                }
            }
            None => {
                configs.remove(task_id);
            }
        }
        Ok(())
    }
}

/// Sends push notifications for completed/updated tasks.
///
/// Mirrors Python SDK's `PushNotificationSender.send_notification(task)`.
#[async_trait]
pub trait PushNotifier: Send + Sync {
    /// Deliver the given task to every push notification config registered
    /// for `task.id`, if any. Never returns an error to the caller — delivery
    /// failures are logged and swallowed so a broken webhook can't fail the
    /// request that triggered it.
    async fn send_notification(&self, task: &Task, configs: &[TaskPushNotificationConfig]);
}

/// HTTP-based [`PushNotifier`] that POSTs the task JSON to each config's URL.
///
/// Authentication header construction follows the first supported scheme in
/// priority order Bearer -> Basic -> API Key:
/// - `Bearer`: `Authorization: Bearer <credentials>`.
/// - `Basic`: `Authorization: Basic <base64(credentials)>` — credentials are
///   base64-encoded as given, whether or not they already contain a `:`.
/// - `API Key` (`apiKey` / `api-key` / `api_key`, case-insensitive):
///   `X-API-Key: <credentials>`.
pub struct HttpPushNotifier {
    client: reqwest::Client,
}

impl HttpPushNotifier {
    /// Create a new push notifier with the given per-request HTTP timeout.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }

    /// Picks the auth header to send, trying schemes in the fixed priority
    /// order Bearer -> Basic -> API Key, regardless of the order the config
    /// lists its supported schemes in.
    fn auth_header(info: &PushNotificationAuthenticationInfo) -> Option<(&'static str, String)> {
        let credentials = info.credentials.as_deref()?;
        let supports = |name: &str| info.schemes.iter().any(|s| s.eq_ignore_ascii_case(name));

        if supports("bearer") {
            return Some(("Authorization", format!("Bearer {credentials}")));
        }
        if supports("basic") {
            let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
            return Some(("Authorization", format!("Basic {encoded}")));
        }
        if supports("apikey") || supports("api-key") || supports("api_key") {
            return Some(("X-API-Key", credentials.to_string()));
        }
        None
    }
}

#[async_trait]
impl PushNotifier for HttpPushNotifier {
    async fn send_notification(&self, task: &Task, configs: &[TaskPushNotificationConfig]) {
        for config in configs {
            let url = &config.push_notification_config.url;
            let mut request = self.client.post(url).json(task);

            if let Some(ref auth) = config.push_notification_config.authentication {
                if let Some((header, value)) = Self::auth_header(auth) {
                    request = request.header(header, value);
                }
            }

            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(task_id = %task.id, url = %url, status = %response.status(), "Push notification delivered");
                }
                Ok(response) => {
                    warn!(task_id = %task.id, url = %url, status = %response.status(), "Push notification webhook returned non-success status");
                }
                Err(err) => {
                    warn!(task_id = %task.id, url = %url, error = %err, "Push notification delivery failed");
                }
            }
        }
    }
}
