//! Result aggregator — folds consumed events into persisted Task state.
//!
//! Mirrors Python SDK's `ResultAggregator` from
//! `a2a.server.request_handlers.result_aggregator`. Sits above an
//! [`EventConsumer`] and a [`TaskManager`], implementing the three
//! consumption modes the request handler needs:
//!
//! - [`ResultAggregator::consume_and_emit`] — fold and re-emit every event
//!   (used by `message/stream` and `tasks/resubscribe`).
//! - [`ResultAggregator::consume_all`] — fold until a terminal event, return
//!   only the final Task or Message (used internally, not currently exposed
//!   by the router but available for alternative transports).
//! - [`ResultAggregator::consume_and_break_on_interrupt`] — fold until a
//!   terminal event or an `auth-required` interruption; on interruption,
//!   continue folding the remainder of the stream in the background so the
//!   Task Store stays consistent (used by `message/send`).

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::A2AResult;
use crate::types::{StreamResponse, Task, TaskState};

use super::event_queue::{is_auth_required_event, is_terminal_event, EventConsumer, EventQueue};
use super::task_manager::TaskManager;

/// The outcome of folding an event stream: either a Task or a direct Message.
#[derive(Debug, Clone)]
pub enum AggregatedOutput {
    /// A Task snapshot, persisted via the Task Manager.
    Task(Task),
    /// A direct Message response (no task was ever created).
    Message(crate::types::Message),
}

/// Result of `consume_and_break_on_interrupt`: either the stream ran to
/// completion, or it was interrupted on `auth-required` with the remainder
/// continuing on a background task.
#[derive(Debug, Clone)]
pub struct InterruptibleResult {
    /// The output observed up to the point of return (terminal or interrupt).
    pub output: AggregatedOutput,
    /// `true` if this is an `auth-required` interruption, not a terminal event.
    pub interrupted: bool,
}

/// Folds consumed events into Task state via a [`TaskManager`], in one of
/// three modes depending on the calling request handler method.
pub struct ResultAggregator {
    task_manager: Arc<Mutex<TaskManager>>,
}

impl ResultAggregator {
    /// Create a new aggregator wrapping the given task manager.
    pub fn new(task_manager: TaskManager) -> Self {
        Self {
            task_manager: Arc::new(Mutex::new(task_manager)),
        }
    }

    async fn fold_event(&self, event: StreamResponse) -> A2AResult<StreamResponse> {
        let mut manager = self.task_manager.lock().await;
        manager.process(event).await
    }

    async fn current_output(&self) -> A2AResult<AggregatedOutput> {
        let mut manager = self.task_manager.lock().await;
        let task = manager.get_task().await?;
        Ok(match task {
            Some(task) => AggregatedOutput::Task(task),
            None => AggregatedOutput::Task(Task {
                id: manager.task_id().unwrap_or_default().to_string(),
                context_id: manager.context_id().unwrap_or_default().to_string(),
                kind: "task".to_string(),
                status: crate::types::TaskStatus {
                    state: TaskState::Submitted,
                    message: None,
                    timestamp: None,
                },
                artifacts: None,
                history: None,
                metadata: None,
            }),
        })
    }

    /// Emit-and-fold: persist every consumed event via the task manager, then
    /// re-emit it. Used by streaming request paths (`message/stream`,
    /// `tasks/resubscribe`). Returns the full ordered sequence of events.
    pub async fn consume_and_emit(&self, mut consumer: EventConsumer) -> Vec<StreamResponse> {
        let mut emitted = Vec::new();
        while let Some(event) = consumer.next_event().await {
            let terminal = is_terminal_event(&event);
            match self.fold_event(event).await {
                Ok(folded) => emitted.push(folded),
                Err(err) => {
                    warn!(error = %err, "Result aggregator failed to fold event");
                }
            }
            if terminal {
                break;
            }
        }
        emitted
    }

    /// Blocking fold: drain the consumer until a terminal event, returning
    /// only the final Task or Message. If the stream produced no events at
    /// all, returns the current Task snapshot (a freshly-initialized one if
    /// no task has been persisted yet).
    pub async fn consume_all(&self, mut consumer: EventConsumer) -> A2AResult<AggregatedOutput> {
        let mut last_message = None;

        while let Some(event) = consumer.next_event().await {
            let terminal = is_terminal_event(&event);
            if let StreamResponse::Message(ref msg) = event {
                last_message = Some(msg.clone());
            }
            self.fold_event(event).await?;
            if terminal {
                break;
            }
        }

        if let Some(message) = last_message {
            return Ok(AggregatedOutput::Message(message));
        }

        self.current_output().await
    }

    /// Break-on-interrupt: fold events until a terminal event or an
    /// `auth-required` interruption. On interruption, returns immediately
    /// with `interrupted = true` and spawns a background task that keeps
    /// draining the consumer (folding the remainder into the task store) so
    /// later `tasks/get` calls see the task's eventual resolution.
    ///
    /// Used by `message/send`, matching the "auth-required interruption"
    /// behavior: the caller gets a prompt response while the agent keeps
    /// working in the background.
    pub async fn consume_and_break_on_interrupt(
        &self,
        mut consumer: EventConsumer,
    ) -> A2AResult<InterruptibleResult> {
        let mut last_message = None;

        loop {
            let Some(event) = consumer.next_event().await else {
                break;
            };

            let terminal = is_terminal_event(&event);
            let interrupted = is_auth_required_event(&event);

            if let StreamResponse::Message(ref msg) = event {
                last_message = Some(msg.clone());
            }
            self.fold_event(event).await?;

            if interrupted {
                debug!("Result aggregator observed auth-required interruption; continuing in background");
                self.spawn_background_drain(consumer);
                let output = match last_message {
                    Some(message) => AggregatedOutput::Message(message),
                    None => self.current_output().await?,
                };
                return Ok(InterruptibleResult {
                    output,
                    interrupted: true,
                });
            }

            if terminal {
                break;
            }
        }

        let output = match last_message {
            Some(message) => AggregatedOutput::Message(message),
            None => self.current_output().await?,
        };
        Ok(InterruptibleResult {
            output,
            interrupted: false,
        })
    }

    /// Emit-and-fold into a sink queue instead of a `Vec`: used when the
    /// caller needs a live, subscribable receiver rather than a buffered
    /// result — `message/stream` and `tasks/resubscribe` both need to start
    /// relaying events before the agent has finished running. Folds each
    /// event through the task manager, re-publishes it to `sink`, and closes
    /// `sink` once a terminal event is observed (or the source is exhausted).
    pub async fn consume_and_emit_into(&self, mut consumer: EventConsumer, sink: EventQueue) {
        while let Some(event) = consumer.next_event().await {
            let terminal = is_terminal_event(&event);
            match self.fold_event(event).await {
                Ok(folded) => {
                    let _ = sink.enqueue_event(folded).await;
                }
                Err(err) => {
                    warn!(error = %err, "Result aggregator failed to fold event");
                }
            }
            if terminal {
                break;
            }
        }
        sink.close().await;
    }

    /// Continues draining `consumer` on a detached task after an interrupt,
    /// folding each event via the shared task manager until a terminal event.
    fn spawn_background_drain(&self, mut consumer: EventConsumer) {
        let task_manager = Arc::clone(&self.task_manager);
        tokio::spawn(async move {
            while let Some(event) = consumer.next_event().await {
                let terminal = is_terminal_event(&event);
                let mut manager = task_manager.lock().await;
                if let Err(err) = manager.process(event).await {
                    warn!(error = %err, "Background fold after interruption failed");
                    break;
                }
                drop(manager);
                if terminal {
                    break;
                }
            }
        });
    }

    /// Access the underlying task manager's current task id, if known.
    pub async fn task_id(&self) -> Option<String> {
        self.task_manager.lock().await.task_id().map(str::to_string)
    }
}
