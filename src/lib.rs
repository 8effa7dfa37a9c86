//! # a2a-rs — Rust runtime for the Agent-to-Agent (A2A) task execution protocol
//!
//! This crate provides a server-side runtime implementing the A2A JSON-RPC
//! 2.0 task execution protocol: agents receive messages, run tasks to
//! completion (or to an interruption point), and stream status/artifact
//! updates back to callers over Server-Sent Events (SSE).
//!
//! ## Overview
//!
//! The runtime lets an agent implementation:
//! - Receive messages and respond with a Task or a direct Message
//! - Stream real-time status and artifact updates via SSE
//! - Persist task state across a multi-turn conversation via a context id
//! - Pause on `input-required`/`auth-required` and resume via follow-up calls
//! - Cancel running tasks and register webhook push notifications
//!
//! This SDK provides:
//! - **Complete type definitions** matching the A2A v0.3 protobuf specification
//! - **Server** framework for building A2A-compatible agents ([`server::AgentExecutor`])
//! - **Ergonomic builders** for constructing complex types ([`AgentCardBuilder`], [`ServerBuilder`])
//!
//! ## Feature flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `server` | yes     | Server traits + axum integration for building agents |
//!
//! ## Quick Start: Server
//!
//! Implement [`server::AgentExecutor`] to define your agent's behavior:
//!
//! ```rust,ignore
//! use a2a_rs::server::{AgentExecutor, RequestContext, EventQueue, TaskUpdater};
//! use a2a_rs::types::Part;
//! use a2a_rs::error::A2AResult;
//! use async_trait::async_trait;
//!
//! struct EchoAgent;
//!
//! #[async_trait]
//! impl AgentExecutor for EchoAgent {
//!     async fn execute(
//!         &self,
//!         context: RequestContext,
//!         event_queue: EventQueue,
//!     ) -> A2AResult<()> {
//!         let updater = TaskUpdater::new(
//!             event_queue,
//!             context.task_id.clone(),
//!             context.context_id.clone(),
//!         );
//!
//!         // Extract text from the incoming message
//!         let text = context.message.parts.iter()
//!             .find_map(|p| match p {
//!                 Part::Text { text, .. } => Some(text.clone()),
//!                 _ => None,
//!             })
//!             .unwrap_or_else(|| "No text received".to_string());
//!
//!         // Echo it back
//!         let response = format!("Echo: {}", text);
//!         updater.complete(Some(&response)).await?;
//!
//!         Ok(())
//!     }
//!
//!     async fn cancel(
//!         &self,
//!         context: RequestContext,
//!         event_queue: EventQueue,
//!     ) -> A2AResult<()> {
//!         let updater = TaskUpdater::new(
//!             event_queue,
//!             context.task_id,
//!             context.context_id,
//!         );
//!         updater.cancel(None).await?;
//!         Ok(())
//!     }
//! }
//! ```
//!
//! Then set up the HTTP server:
//!
//! ```rust,ignore
//! use a2a_rs::server::{a2a_router, DefaultRequestHandler, InMemoryTaskStore};
//! use a2a_rs::AgentCardBuilder;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Build an agent card
//!     let agent_card = AgentCardBuilder::new("Echo Agent")
//!         .description("A simple agent that echoes back your messages")
//!         .version("1.0.0")
//!         .url("http://localhost:3000/a2a")
//!         .build()?;
//!
//!     let executor = Arc::new(EchoAgent);
//!     let store = Arc::new(InMemoryTaskStore::new());
//!     let handler = Arc::new(DefaultRequestHandler::new(
//!         executor, store, queue_manager, push_notifier, push_config_store, None,
//!     ));
//!
//!     // Build the router with A2A routes
//!     let app = a2a_router(handler, agent_card, "/.well-known/agent.json");
//!
//!     // Start the server
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! The server automatically provides:
//! - `POST /a2a` — JSON-RPC 2.0 endpoint for all A2A methods
//! - `GET /.well-known/agent.json` — Agent card discovery
//!
//! ## Protocol Compliance
//!
//! This crate implements **A2A protocol v0.3** as defined in the
//! [official specification](https://a2a-protocol.org/latest/specification/).
//!
//! All types match the protobuf definitions at
//! [`a2a.proto`](https://github.com/a2aproject/A2A/blob/main/specification/a2a.proto).
//!
//! Supported JSON-RPC methods:
//! - `message/send` — Send a message and get a task
//! - `message/stream` — Send a message with SSE streaming
//! - `tasks/get` — Retrieve a task by ID
//! - `tasks/list` — List tasks with filtering
//! - `tasks/cancel` — Cancel a running task
//! - `tasks/subscribe` / `tasks/resubscribe` — Subscribe to task updates (SSE)
//! - `tasks/pushNotificationConfig/{set,get,list,delete}` — Webhook registration
//!
//! ## Architecture
//!
//! ### Server
//!
//! - [`server::AgentExecutor`] — Trait for implementing your agent's logic
//! - [`server::RequestHandler`] — Trait for handling JSON-RPC requests
//! - [`server::DefaultRequestHandler`] — Reference implementation of `RequestHandler`
//! - [`server::TaskStore`] — Trait for task persistence
//! - [`server::InMemoryTaskStore`] — In-memory task store implementation
//! - [`server::EventQueue`] — Broadcast channel for SSE events
//! - [`server::TaskUpdater`] — Helper for publishing task status/artifact updates
//! - [`server::a2a_router`] — Creates an axum `Router` with A2A routes
//!
//! ### Core Types
//!
//! - [`types::Task`] — A2A task with status, history, and artifacts
//! - [`types::Message`] — A message with text/file/data parts
//! - [`types::Part`] — Content part (text, file, or structured data)
//! - [`types::TaskState`] — Task lifecycle state machine
//! - [`types::StreamResponse`] — SSE event types (status updates, artifact updates)
//! - [`types::AgentCard`] — Agent metadata and capabilities
//! - [`error::A2AError`] — Error types with JSON-RPC error codes
//!
//! ## Examples
//!
//! See the `demos/` directory for complete, runnable agents built on this runtime.

pub mod builders;
pub mod error;
pub mod types;
pub mod utils;

#[cfg(feature = "server")]
pub mod server;

/// Prelude module that re-exports commonly used types and traits.
///
/// Import this module with `use a2a_rs::prelude::*;` to get access to the most
/// frequently used types without having to import them individually.
///
/// # Example
///
/// ```
/// use a2a_rs::prelude::*;
///
/// // Now you have access to common types like:
/// // - Message, Part, Task, TaskState, Role
/// // - AgentCard, AgentSkill, AgentCapabilities
/// // - A2AError, A2AResult
/// // - builders like AgentCardBuilder
/// ```
pub mod prelude {
    // Core types
    pub use crate::types::{
        AgentCapabilities, AgentCard, AgentInterface, AgentSkill, Artifact, FileContent,
        FileWithBytes, FileWithUri, Message, Part, Role, SendMessageConfiguration,
        SendMessageParams, StreamResponse, Task, TaskArtifactUpdateEvent, TaskState, TaskStatus,
        TaskStatusUpdateEvent,
    };

    // Error types
    pub use crate::error::{A2AError, A2AResult};

    // Builders
    pub use crate::builders::AgentCardBuilder;

    #[cfg(feature = "server")]
    pub use crate::builders::ServerBuilder;

    #[cfg(feature = "server")]
    pub use crate::server::{
        a2a_router, AgentExecutor, EventConsumer, EventQueue, InMemoryQueueManager,
        InMemoryTaskStore, QueueManager, RequestContext, RequestContextBuilder, ServerCallContext,
        SimpleRequestContextBuilder, TaskManager, TaskStore, TaskUpdater,
    };
}

// Re-export core types at crate root for convenience.
pub use builders::AgentCardBuilder;
pub use error::{A2AError, A2AResult};
pub use types::*;

#[cfg(feature = "server")]
pub use builders::ServerBuilder;
