//! Request handler — coordinates agent execution, task storage, and event delivery.
//!
//! Mirrors Python SDK's `RequestHandler(ABC)` and `DefaultRequestHandler` from
//! `a2a.server.request_handlers`.
//!
//! The [`RequestHandler`] trait defines the interface that the axum integration
//! layer calls for each JSON-RPC method. [`DefaultRequestHandler`] provides
//! the standard implementation that wires together an [`AgentExecutor`],
//! [`TaskStore`], [`QueueManager`], and [`PushNotifier`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::{A2AError, A2AResult};
use crate::types::{
    Message, Part, SendMessageResponse, StreamResponse, Task, TaskPushNotificationConfig,
    TaskState, TaskStatus, TaskStatusUpdateEvent,
};

use super::agent_executor::{AgentExecutor, RequestContext};
use super::event_queue::{EventConsumer, EventQueue, QueueManager};
use super::push_notifier::{PushNotifier, TaskPushNotificationConfigStore};
use super::result_aggregator::{AggregatedOutput, ResultAggregator};
use super::task_manager::TaskManager;
use super::task_store::{TaskListParams, TaskListResponse, TaskStore};

/// Parameters for `message/send` and `message/stream`.
#[derive(Debug, Clone)]
pub struct SendMessageParams {
    /// The message to send to the agent.
    pub message: Message,

    /// Optional configuration for the send operation.
    pub configuration: Option<SendMessageConfiguration>,

    /// Optional metadata attached to the request.
    pub metadata: Option<serde_json::Value>,

    /// Optional tenant identifier.
    pub tenant: Option<String>,
}

/// Configuration options for message sending.
#[derive(Debug, Clone)]
pub struct SendMessageConfiguration {
    /// Accepted output MIME types / modes.
    pub accepted_output_modes: Option<Vec<String>>,

    /// If `true`, the server should block until the task completes.
    /// If `false` or `None`, the server may return immediately with a
    /// `submitted` or `working` task.
    pub blocking: Option<bool>,

    /// Maximum number of history messages to include in the response.
    pub history_length: Option<usize>,

    /// Push notification configuration.
    pub push_notification_config: Option<serde_json::Value>,
}

/// Parameters for `tasks/get`.
#[derive(Debug, Clone)]
pub struct GetTaskParams {
    /// The task ID to retrieve.
    pub id: String,

    /// Maximum number of history messages to include.
    pub history_length: Option<usize>,

    /// Optional metadata.
    pub metadata: Option<serde_json::Value>,

    /// Optional tenant identifier.
    pub tenant: Option<String>,
}

/// Parameters for `tasks/cancel`.
#[derive(Debug, Clone)]
pub struct CancelTaskParams {
    /// The task ID to cancel.
    pub id: String,

    /// Optional metadata.
    pub metadata: Option<serde_json::Value>,

    /// Optional tenant identifier.
    pub tenant: Option<String>,
}

/// Parameters for `tasks/subscribe` and `tasks/resubscribe`.
#[derive(Debug, Clone)]
pub struct SubscribeToTaskParams {
    /// The task ID to subscribe to.
    pub id: String,

    /// Optional metadata.
    pub metadata: Option<serde_json::Value>,

    /// Optional tenant identifier.
    pub tenant: Option<String>,
}

/// Parameters for `tasks/pushNotificationConfig/get`, `/list`, and `/delete`.
///
/// Accepts either the short `{ id }` form (task id only) or the explicit
/// `{ taskId, pushNotificationConfigId? }` form — the axum layer normalizes
/// both into this struct.
#[derive(Debug, Clone)]
pub struct TaskPushNotificationConfigParams {
    /// The task the config is registered against.
    pub task_id: String,

    /// The specific config id, if more than one is registered for the task.
    pub push_notification_config_id: Option<String>,
}

/// Trait for handling A2A JSON-RPC requests.
///
/// Each method corresponds to an A2A JSON-RPC method. The axum integration
/// layer dispatches incoming requests to these methods.
///
/// Mirrors Python SDK's `RequestHandler(ABC)` from
/// `a2a.server.request_handlers.request_handler`.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Handle `message/send` — execute agent logic and return the completed task or message.
    async fn on_message_send(&self, params: SendMessageParams) -> A2AResult<SendMessageResponse>;

    /// Handle `message/stream` — execute agent logic and return an event stream.
    async fn on_message_send_stream(
        &self,
        params: SendMessageParams,
    ) -> A2AResult<broadcast::Receiver<StreamResponse>>;

    /// Handle `tasks/get` — retrieve a task by ID.
    async fn on_get_task(&self, params: GetTaskParams) -> A2AResult<Task>;

    /// Handle `tasks/list` — list tasks matching filter criteria.
    async fn on_list_tasks(&self, params: TaskListParams) -> A2AResult<TaskListResponse>;

    /// Handle `tasks/cancel` — cancel a running task.
    async fn on_cancel_task(&self, params: CancelTaskParams) -> A2AResult<Task>;

    /// Handle `tasks/resubscribe` — re-subscribe to events for a running task.
    ///
    /// Allows a client to re-attach to a running streaming task's event stream.
    /// Default implementation returns `UnsupportedOperation`.
    async fn on_resubscribe_to_task(
        &self,
        params: SubscribeToTaskParams,
    ) -> A2AResult<broadcast::Receiver<StreamResponse>> {
        let _ = params;
        Err(A2AError::UnsupportedOperation {
            message: "tasks/resubscribe is not supported".to_string(),
            data: None,
        })
    }

    /// Handle `tasks/subscribe` — subscribe to events for an existing task.
    async fn on_subscribe_to_task(
        &self,
        params: SubscribeToTaskParams,
    ) -> A2AResult<broadcast::Receiver<StreamResponse>>;

    /// Handle `tasks/pushNotificationConfig/set`.
    ///
    /// Default implementation returns `UnsupportedOperation`.
    async fn on_set_task_push_notification_config(
        &self,
        config: TaskPushNotificationConfig,
    ) -> A2AResult<TaskPushNotificationConfig> {
        let _ = config;
        Err(A2AError::UnsupportedOperation {
            message: "Push notification config is not supported".to_string(),
            data: None,
        })
    }

    /// Handle `tasks/pushNotificationConfig/get`.
    ///
    /// Default implementation returns `UnsupportedOperation`.
    async fn on_get_task_push_notification_config(
        &self,
        params: TaskPushNotificationConfigParams,
    ) -> A2AResult<TaskPushNotificationConfig> {
        let _ = params;
        Err(A2AError::UnsupportedOperation {
            message: "Push notification config is not supported".to_string(),
            data: None,
        })
    }

    /// Handle `tasks/pushNotificationConfig/list`.
    ///
    /// Default implementation returns `UnsupportedOperation`.
    async fn on_list_task_push_notification_config(
        &self,
        task_id: &str,
    ) -> A2AResult<Vec<TaskPushNotificationConfig>> {
        let _ = task_id;
        Err(A2AError::UnsupportedOperation {
            message: "Push notification config is not supported".to_string(),
            data: None,
        })
    }

    /// Handle `tasks/pushNotificationConfig/delete`.
    ///
    /// Default implementation returns `UnsupportedOperation`.
    async fn on_delete_task_push_notification_config(
        &self,
        params: TaskPushNotificationConfigParams,
    ) -> A2AResult<()> {
        let _ = params;
        Err(A2AError::UnsupportedOperation {
            message: "Push notification config is not supported".to_string(),
            data: None,
        })
    }
}

/// Adapts a shared `Arc<dyn TaskStore>` to the owned `Box<dyn TaskStore>`
/// that `TaskManager` expects, without copying the underlying store.
struct SharedTaskStore(Arc<dyn TaskStore>);

#[async_trait]
impl TaskStore for SharedTaskStore {
    async fn save(&self, task: Task) -> A2AResult<()> {
        self.0.save(task).await
    }

    async fn get(&self, task_id: &str) -> A2AResult<Option<Task>> {
        self.0.get(task_id).await
    }

    async fn delete(&self, task_id: &str) -> A2AResult<()> {
        self.0.delete(task_id).await
    }

    async fn list(&self, params: &TaskListParams) -> A2AResult<TaskListResponse> {
        self.0.list(params).await
    }
}

/// Default request handler — standard implementation wiring executor, store, and events.
///
/// This is the primary implementation of [`RequestHandler`] that coordinates:
/// - An [`AgentExecutor`] for running agent logic
/// - A [`TaskStore`] for persisting task state
/// - A [`QueueManager`] for per-task event queue lifecycle
/// - A [`PushNotifier`] and [`TaskPushNotificationConfigStore`] for webhook delivery
///
/// # Lifecycle
///
/// 1. `on_message_send` or `on_message_send_stream` creates a new task (or looks up
///    an existing one), resolves its event queue via the queue manager, and spawns
///    the agent executor.
/// 2. The executor publishes events to the task's event queue.
/// 3. For `message/send`: a [`ResultAggregator`] folds events until a terminal
///    event or an `auth-required` interruption, then the result is returned.
/// 4. For `message/stream`: the aggregator relays every folded event to a fresh
///    broadcast receiver as it goes.
/// 5. `on_cancel_task` calls the executor's cancel method and waits for the
///    resulting task update.
pub struct DefaultRequestHandler {
    executor: Arc<dyn AgentExecutor>,
    task_store: Arc<dyn TaskStore>,
    queue_manager: Arc<dyn QueueManager>,
    push_notifier: Arc<dyn PushNotifier>,
    push_config_store: Arc<dyn TaskPushNotificationConfigStore>,
    consumer_poll_timeout: Option<Duration>,
    /// Handles to spawned agent-execution tasks, keyed by task ID — kept
    /// separately from the queue manager so `tasks/cancel` can abort the
    /// in-flight executor future.
    running_handles: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl DefaultRequestHandler {
    /// Create a new default request handler.
    pub fn new(
        executor: Arc<dyn AgentExecutor>,
        task_store: Arc<dyn TaskStore>,
        queue_manager: Arc<dyn QueueManager>,
        push_notifier: Arc<dyn PushNotifier>,
        push_config_store: Arc<dyn TaskPushNotificationConfigStore>,
        consumer_poll_timeout: Option<Duration>,
    ) -> Self {
        Self {
            executor,
            task_store,
            queue_manager,
            push_notifier,
            push_config_store,
            consumer_poll_timeout,
            running_handles: Mutex::new(HashMap::new()),
        }
    }

    fn task_manager_for(&self, task: &Task, initial_message: Option<Message>) -> A2AResult<TaskManager> {
        TaskManager::new(
            Some(task.id.clone()),
            Some(task.context_id.clone()),
            Box::new(SharedTaskStore(Arc::clone(&self.task_store))),
            initial_message,
        )
    }

    /// Create or retrieve a task for the given message.
    ///
    /// Mirrors Python SDK's `_setup_message_execution` task resolution logic:
    /// 1. If `task_id` is set, look up the existing task and validate state.
    /// 2. If the task exists but is terminal, return `InvalidParams`.
    /// 3. If `task_id` is set but doesn't exist, return `TaskNotFound`.
    /// 4. Otherwise create a new task in `submitted` state.
    async fn get_or_create_task(&self, params: &SendMessageParams) -> A2AResult<Task> {
        // Check if the message references an existing task.
        if let Some(ref task_id) = params.message.task_id {
            if let Some(task) = self.task_store.get(task_id).await? {
                if task.status.state.is_terminal() {
                    return Err(A2AError::InvalidParams {
                        message: format!(
                            "Task {} is in terminal state: {}",
                            task_id, task.status.state
                        ),
                        data: None,
                    });
                }
                // Move current status.message to history first, then append
                // the incoming message (mirrors TaskManager::update_with_message).
                let mut updated_task = task;
                if let Some(ref status_msg) = updated_task.status.message {
                    let history = updated_task.history.get_or_insert_with(Vec::new);
                    history.push(status_msg.clone());
                    updated_task.status.message = None;
                }
                let history = updated_task.history.get_or_insert_with(Vec::new);
                history.push(params.message.clone());
                self.task_store.save(updated_task.clone()).await?;
                return Ok(updated_task);
            } else {
                return Err(A2AError::TaskNotFound {
                    message: format!("Task {} was specified but does not exist", task_id),
                    data: None,
                });
            }
        }

        // Create a new task.
        let task_id = Uuid::new_v4().to_string();
        let context_id = params
            .message
            .context_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let task = Task {
            id: task_id,
            context_id,
            kind: "task".to_string(),
            status: TaskStatus {
                state: TaskState::Submitted,
                message: None,
                timestamp: Some(chrono::Utc::now().to_rfc3339()),
            },
            artifacts: None,
            history: Some(vec![params.message.clone()]),
            metadata: params.metadata.clone(),
        };

        self.task_store.save(task.clone()).await?;
        debug!(task_id = %task.id, "Created new task");

        Ok(task)
    }

    /// Resolve (creating if necessary) the task's event queue and spawn the
    /// agent executor against it.
    ///
    /// Mirrors Python SDK's `_run_event_stream` — executes the agent and lets
    /// the queue close naturally once the executor future (and its sender)
    /// drops. Does NOT auto-publish a `Working` status; that is the
    /// responsibility of the `AgentExecutor` implementation.
    async fn spawn_executor(
        &self,
        task: &Task,
        message: &Message,
        configuration: Option<&SendMessageConfiguration>,
    ) -> A2AResult<EventQueue> {
        let event_queue = self.queue_manager.create_or_tap(&task.id).await;

        let types_config = configuration.map(|c| crate::types::SendMessageConfiguration {
            accepted_output_modes: c.accepted_output_modes.clone(),
            push_notification_config: c
                .push_notification_config
                .as_ref()
                .and_then(|v| serde_json::from_value(v.clone()).ok()),
            history_length: c.history_length.map(|h| h as i32),
            blocking: c.blocking,
        });

        let context = RequestContext {
            task_id: task.id.clone(),
            context_id: task.context_id.clone(),
            message: Some(message.clone()),
            task: Some(task.clone()),
            configuration: types_config,
            related_tasks: Vec::new(),
            metadata: task.metadata.clone(),
            call_context: None,
        };

        let executor = Arc::clone(&self.executor);
        let queue_clone = event_queue.clone();
        let task_id = task.id.clone();
        let context_id = task.context_id.clone();

        let handle = tokio::spawn(async move {
            if let Err(e) = executor.execute(context, queue_clone.clone()).await {
                error!(task_id = %task_id, error = %e, "Agent execution failed");

                let failed_event = StreamResponse::StatusUpdate(TaskStatusUpdateEvent {
                    task_id: task_id.clone(),
                    context_id: context_id.clone(),
                    kind: "status-update".to_string(),
                    status: TaskStatus {
                        state: TaskState::Failed,
                        message: Some(Message {
                            message_id: Uuid::new_v4().to_string(),
                            role: crate::types::Role::Agent,
                            kind: "message".to_string(),
                            parts: vec![Part::text(format!("Agent execution failed: {}", e))],
                            context_id: None,
                            task_id: Some(task_id.clone()),
                            metadata: None,
                            extensions: None,
                            reference_task_ids: None,
                        }),
                        timestamp: Some(chrono::Utc::now().to_rfc3339()),
                    },
                    r#final: true,
                    metadata: None,
                });
                let _ = queue_clone.enqueue_event(failed_event).await;
            }
        });

        let mut running = self.running_handles.lock().await;
        running.insert(task.id.clone(), handle);

        Ok(event_queue)
    }

    /// Trim task history to the requested length.
    ///
    /// Mirrors Python SDK's `apply_history_length`:
    /// - Only trims if `max_length` is `Some` AND > 0 AND history exists.
    /// - Keeps the most recent N messages (tail).
    fn trim_history(task: &mut Task, max_length: Option<usize>) {
        if let Some(max) = max_length {
            if max > 0 {
                if let Some(ref mut history) = task.history {
                    if history.len() > max {
                        let start = history.len() - max;
                        *history = history.split_off(start);
                    }
                }
            }
        }
    }

    /// Best-effort push notification fire-and-forget for a task result.
    async fn notify(&self, task: &Task) {
        match self.push_config_store.get(&task.id).await {
            Ok(configs) if !configs.is_empty() => {
                self.push_notifier.send_notification(task, &configs).await;
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(task_id = %task.id, error = %err, "Failed to load push notification configs");
            }
        }
    }
}

#[async_trait]
impl RequestHandler for DefaultRequestHandler {
    async fn on_message_send(&self, params: SendMessageParams) -> A2AResult<SendMessageResponse> {
        let task = self.get_or_create_task(&params).await?;
        let queue = self
            .spawn_executor(&task, &params.message, params.configuration.as_ref())
            .await?;
        let consumer = EventConsumer::with_poll_timeout(queue, self.consumer_poll_timeout);

        let task_manager = self.task_manager_for(&task, Some(params.message.clone()))?;
        let aggregator = ResultAggregator::new(task_manager);

        let result = aggregator.consume_and_break_on_interrupt(consumer).await?;

        {
            let mut running = self.running_handles.lock().await;
            running.remove(&task.id);
        }

        let history_length = params.configuration.as_ref().and_then(|c| c.history_length);

        let response = match result.output {
            AggregatedOutput::Task(mut final_task) => {
                Self::trim_history(&mut final_task, history_length);
                self.notify(&final_task).await;
                SendMessageResponse::Task(final_task)
            }
            AggregatedOutput::Message(message) => SendMessageResponse::Message(message),
        };

        if !result.interrupted {
            let _ = self.queue_manager.close(&task.id).await;
        }

        Ok(response)
    }

    async fn on_message_send_stream(
        &self,
        params: SendMessageParams,
    ) -> A2AResult<broadcast::Receiver<StreamResponse>> {
        let task = self.get_or_create_task(&params).await?;
        let queue = self
            .spawn_executor(&task, &params.message, params.configuration.as_ref())
            .await?;
        let consumer = EventConsumer::with_poll_timeout(queue, self.consumer_poll_timeout);

        let task_manager = self.task_manager_for(&task, Some(params.message.clone()))?;
        let aggregator = ResultAggregator::new(task_manager);

        let sink = EventQueue::with_default_capacity();
        let rx = sink.subscribe();
        let task_id = task.id.clone();

        tokio::spawn(async move {
            aggregator.consume_and_emit_into(consumer, sink).await;
            debug!(task_id = %task_id, "Stream relay finished");
        });

        Ok(rx)
    }

    async fn on_get_task(&self, params: GetTaskParams) -> A2AResult<Task> {
        let mut task =
            self.task_store
                .get(&params.id)
                .await?
                .ok_or_else(|| A2AError::TaskNotFound {
                    message: params.id.clone(),
                    data: None,
                })?;

        Self::trim_history(&mut task, params.history_length);
        Ok(task)
    }

    async fn on_list_tasks(&self, params: TaskListParams) -> A2AResult<TaskListResponse> {
        self.task_store.list(&params).await
    }

    async fn on_cancel_task(&self, params: CancelTaskParams) -> A2AResult<Task> {
        let task =
            self.task_store
                .get(&params.id)
                .await?
                .ok_or_else(|| A2AError::TaskNotFound {
                    message: params.id.clone(),
                    data: None,
                })?;

        if task.status.state.is_terminal() {
            return Err(A2AError::TaskNotCancelable {
                message: format!(
                    "Task cannot be canceled - current state: {}",
                    task.status.state
                ),
                data: None,
            });
        }

        let queue = self
            .queue_manager
            .get(&params.id)
            .await
            .unwrap_or_else(EventQueue::with_default_capacity);

        let context = RequestContext {
            task_id: task.id.clone(),
            context_id: task.context_id.clone(),
            message: None,
            task: Some(task.clone()),
            configuration: None,
            related_tasks: Vec::new(),
            metadata: params.metadata,
            call_context: None,
        };

        self.executor.cancel(context, queue.clone()).await?;

        {
            let mut running = self.running_handles.lock().await;
            if let Some(handle) = running.remove(&params.id) {
                handle.abort();
            }
        }

        // Consume one event — expected to be the agent's updated Task
        // (mirrors the cancel contract: the executor publishes the canceled
        // task snapshot, we fold it through the task manager and read it back).
        let mut consumer = EventConsumer::with_poll_timeout(queue, self.consumer_poll_timeout);
        let mut task_manager = self.task_manager_for(&task, None)?;
        if let Some(event) = consumer.next_event().await {
            task_manager.process(event).await?;
        }

        let final_task = task_manager
            .get_task()
            .await?
            .ok_or_else(|| A2AError::TaskNotFound {
                message: params.id.clone(),
                data: None,
            })?;

        if final_task.status.state != TaskState::Canceled {
            return Err(A2AError::TaskNotCancelable {
                message: format!(
                    "Task cannot be canceled - current state: {}",
                    final_task.status.state
                ),
                data: None,
            });
        }

        self.notify(&final_task).await;
        let _ = self.queue_manager.close(&params.id).await;

        Ok(final_task)
    }

    async fn on_subscribe_to_task(
        &self,
        params: SubscribeToTaskParams,
    ) -> A2AResult<broadcast::Receiver<StreamResponse>> {
        let task =
            self.task_store
                .get(&params.id)
                .await?
                .ok_or_else(|| A2AError::TaskNotFound {
                    message: params.id.clone(),
                    data: None,
                })?;

        if task.status.state.is_terminal() {
            return Err(A2AError::InvalidParams {
                message: format!(
                    "Task {} is in terminal state {:?} — cannot subscribe",
                    params.id, task.status.state
                ),
                data: None,
            });
        }

        match self.queue_manager.tap(&params.id).await {
            Some(tapped) => Ok(tapped.subscribe()),
            None => Err(A2AError::TaskNotFound {
                message: format!(
                    "Task {} has no active agent execution — cannot subscribe",
                    params.id
                ),
                data: None,
            }),
        }
    }

    async fn on_resubscribe_to_task(
        &self,
        params: SubscribeToTaskParams,
    ) -> A2AResult<broadcast::Receiver<StreamResponse>> {
        let task =
            self.task_store
                .get(&params.id)
                .await?
                .ok_or_else(|| A2AError::TaskNotFound {
                    message: params.id.clone(),
                    data: None,
                })?;

        if task.status.state.is_terminal() {
            return Err(A2AError::InvalidParams {
                message: format!(
                    "Task {} is in terminal state: {}",
                    params.id, task.status.state
                ),
                data: None,
            });
        }

        match self.queue_manager.tap(&params.id).await {
            Some(tapped) => Ok(tapped.subscribe()),
            None => Err(A2AError::TaskNotFound {
                message: format!("Task {} has no active agent execution", params.id),
                data: None,
            }),
        }
    }

    async fn on_set_task_push_notification_config(
        &self,
        config: TaskPushNotificationConfig,
    ) -> A2AResult<TaskPushNotificationConfig> {
        self.task_store
            .get(&config.task_id)
            .await?
            .ok_or_else(|| A2AError::TaskNotFound {
                message: config.task_id.clone(),
                data: None,
            })?;

        self.push_config_store.set(config).await
    }

    async fn on_get_task_push_notification_config(
        &self,
        params: TaskPushNotificationConfigParams,
    ) -> A2AResult<TaskPushNotificationConfig> {
        self.task_store
            .get(&params.task_id)
            .await?
            .ok_or_else(|| A2AError::TaskNotFound {
                message: params.task_id.clone(),
                data: None,
            })?;

        let configs = self.push_config_store.get(&params.task_id).await?;
        match params.push_notification_config_id {
            Some(ref id) => configs
                .into_iter()
                .find(|c| c.id.as_deref() == Some(id.as_str()))
                .ok_or_else(|| A2AError::TaskNotFound {
                    message: format!(
                        "No push notification config {} for task {}",
                        id, params.task_id
                    ),
                    data: None,
                }),
            None => configs.into_iter().next().ok_or_else(|| A2AError::TaskNotFound {
                message: format!(
                    "No push notification config registered for task {}",
                    params.task_id
                ),
                data: None,
            }),
        }
    }

    async fn on_list_task_push_notification_config(
        &self,
        task_id: &str,
    ) -> A2AResult<Vec<TaskPushNotificationConfig>> {
        self.task_store
            .get(task_id)
            .await?
            .ok_or_else(|| A2AError::TaskNotFound {
                message: task_id.to_string(),
                data: None,
            })?;

        self.push_config_store.list(task_id).await
    }

    async fn on_delete_task_push_notification_config(
        &self,
        params: TaskPushNotificationConfigParams,
    ) -> A2AResult<()> {
        self.task_store
            .get(&params.task_id)
            .await?
            .ok_or_else(|| A2AError::TaskNotFound {
                message: params.task_id.clone(),
                data: None,
            })?;

        self.push_config_store
            .delete(&params.task_id, params.push_notification_config_id.as_deref())
            .await
    }
}
