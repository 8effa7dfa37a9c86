//! Builder patterns for ergonomic construction of A2A types.

use crate::types::*;
use std::collections::HashMap;

/// Builder for constructing [`AgentCard`] with sensible defaults.
///
/// # Example
///
/// ```
/// use a2a_rs::builders::AgentCardBuilder;
///
/// let card = AgentCardBuilder::new("My Agent", "An example agent", "1.0.0")
///     .with_jsonrpc_interface("http://localhost:8080/a2a")
///     .with_skill("chat", "Chat", "Conversational AI", vec!["conversation".to_string()])
///     .with_streaming(true)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct AgentCardBuilder {
    name: String,
    description: String,
    version: String,
    supported_interfaces: Vec<AgentInterface>,
    provider: Option<AgentProvider>,
    documentation_url: Option<String>,
    capabilities: AgentCapabilities,
    security_schemes: Option<HashMap<String, SecurityScheme>>,
    security_requirements: Vec<SecurityRequirement>,
    default_input_modes: Vec<String>,
    default_output_modes: Vec<String>,
    skills: Vec<AgentSkill>,
    signatures: Option<Vec<AgentCardSignature>>,
    icon_url: Option<String>,
    additional_interfaces: Option<Vec<AgentInterface>>,
    preferred_transport: Option<String>,
    protocol_version: Option<String>,
    url: String,
    supports_authenticated_extended_card: Option<bool>,
    security: Option<Vec<HashMap<String, Vec<String>>>>,
}

impl AgentCardBuilder {
    /// Create a new builder with required fields.
    ///
    /// # Arguments
    ///
    /// * `name` - Human-readable agent name
    /// * `description` - Description of agent capabilities
    /// * `version` - Version string (e.g., "1.0.0")
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            version: version.into(),
            supported_interfaces: Vec::new(),
            provider: None,
            documentation_url: None,
            capabilities: AgentCapabilities {
                streaming: None,
                push_notifications: None,
                extensions: None,
                state_transition_history: None,
            },
            security_schemes: None,
            security_requirements: Vec::new(),
            default_input_modes: vec!["text/plain".to_string()],
            default_output_modes: vec!["text/plain".to_string()],
            skills: Vec::new(),
            signatures: None,
            icon_url: None,
            additional_interfaces: None,
            preferred_transport: None,
            protocol_version: Some("0.3".to_string()),
            url: String::new(),
            supports_authenticated_extended_card: None,
            security: None,
        }
    }

    /// Add a JSON-RPC interface at the given URL.
    pub fn with_jsonrpc_interface(mut self, url: impl Into<String>) -> Self {
        let url_str = url.into();
        self.supported_interfaces.push(AgentInterface {
            url: url_str.clone(),
            transport: "JSONRPC".to_string(),
            tenant: None,
            protocol_version: Some("0.3".to_string()),
        });
        if self.url.is_empty() {
            self.url = url_str;
        }
        self
    }

    /// Add a custom interface.
    pub fn with_interface(mut self, interface: AgentInterface) -> Self {
        self.supported_interfaces.push(interface);
        self
    }

    /// Set the provider information.
    pub fn with_provider(
        mut self,
        organization: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.provider = Some(AgentProvider {
            organization: organization.into(),
            url: url.into(),
        });
        self
    }

    /// Set the documentation URL.
    pub fn with_documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = Some(url.into());
        self
    }

    /// Enable or disable streaming support.
    pub fn with_streaming(mut self, enabled: bool) -> Self {
        self.capabilities.streaming = Some(enabled);
        self
    }

    /// Enable or disable push notifications support.
    pub fn with_push_notifications(mut self, enabled: bool) -> Self {
        self.capabilities.push_notifications = Some(enabled);
        self
    }

    /// Add a protocol extension.
    pub fn with_extension(
        mut self,
        uri: impl Into<String>,
        description: Option<String>,
        required: bool,
    ) -> Self {
        self.capabilities
            .extensions
            .get_or_insert_with(Vec::new)
            .push(AgentExtension {
                uri: uri.into(),
                description,
                required: Some(required),
                params: None,
            });
        self
    }

    /// Add a skill to the agent card.
    pub fn with_skill(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        self.skills.push(AgentSkill {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            tags,
            examples: None,
            input_modes: None,
            output_modes: None,
            security_requirements: None,
            security: None,
        });
        self
    }

    /// Add a skill with examples.
    pub fn with_skill_examples(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<String>,
        examples: Vec<String>,
    ) -> Self {
        self.skills.push(AgentSkill {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            tags,
            examples: Some(examples),
            input_modes: None,
            output_modes: None,
            security_requirements: None,
            security: None,
        });
        self
    }

    /// Set the default input MIME types.
    pub fn with_input_modes(mut self, modes: Vec<String>) -> Self {
        self.default_input_modes = modes;
        self
    }

    /// Set the default output MIME types.
    pub fn with_output_modes(mut self, modes: Vec<String>) -> Self {
        self.default_output_modes = modes;
        self
    }

    /// Set the icon URL.
    pub fn with_icon_url(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }

    /// Set the preferred transport protocol.
    pub fn with_preferred_transport(mut self, transport: impl Into<String>) -> Self {
        self.preferred_transport = Some(transport.into());
        self
    }

    /// Build the [`AgentCard`].
    pub fn build(self) -> AgentCard {
        AgentCard {
            name: self.name,
            description: self.description,
            version: self.version,
            supported_interfaces: self.supported_interfaces,
            provider: self.provider,
            documentation_url: self.documentation_url,
            capabilities: self.capabilities,
            security_schemes: self.security_schemes,
            security_requirements: self.security_requirements,
            default_input_modes: self.default_input_modes,
            default_output_modes: self.default_output_modes,
            skills: self.skills,
            signatures: self.signatures,
            icon_url: self.icon_url,
            additional_interfaces: self.additional_interfaces,
            preferred_transport: self.preferred_transport,
            protocol_version: self.protocol_version,
            url: self.url,
            supports_authenticated_extended_card: self.supports_authenticated_extended_card,
            security: self.security,
        }
    }
}

/// Runtime configuration surface for a [`ServerBuilder`].
///
/// Bundles the knobs that don't belong to any single component: queue
/// capacity, consumer poll timeout, and push notifier HTTP timeout.
#[cfg(feature = "server")]
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Maximum number of buffered events per task event queue before the
    /// broadcast channel applies backpressure/lag. Defaults to 1024.
    pub event_queue_max_size: usize,
    /// How long `EventConsumer::consume_one` waits for an event before
    /// giving up. `None` means wait indefinitely.
    pub consumer_poll_timeout: Option<std::time::Duration>,
    /// Timeout applied to outbound push notification HTTP requests.
    pub push_notifier_http_timeout: std::time::Duration,
    /// Path at which the agent card is served, in place of the default
    /// `/.well-known/agent.json`.
    pub agent_card_path: String,
}

#[cfg(feature = "server")]
impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_queue_max_size: 1024,
            consumer_poll_timeout: None,
            push_notifier_http_timeout: std::time::Duration::from_secs(10),
            agent_card_path: "/.well-known/agent.json".to_string(),
        }
    }
}

/// Builder for constructing an A2A axum server with fluent configuration.
///
/// # Example
///
/// ```rust,ignore
/// use a2a_rs::builders::ServerBuilder;
/// use a2a_rs::server::{AgentExecutor, InMemoryTaskStore};
/// use std::sync::Arc;
///
/// # async fn example(executor: Arc<dyn AgentExecutor>) {
/// let app = ServerBuilder::new(executor)
///     .with_agent_card(|builder| {
///         builder
///             .with_jsonrpc_interface("http://localhost:8080/a2a")
///             .with_skill("chat", "Chat", "Conversational AI", vec!["conversation"])
///             .with_streaming(true)
///     })
///     .with_task_store(Arc::new(InMemoryTaskStore::new()))
///     .with_cors(true)
///     .build();
///
/// // Serve with axum.
/// axum::Server::bind(&"0.0.0.0:8080".parse().unwrap())
///     .serve(app.into_make_service())
///     .await
///     .unwrap();
/// # }
/// ```
#[cfg(feature = "server")]
pub struct ServerBuilder {
    executor: std::sync::Arc<dyn crate::server::AgentExecutor>,
    task_store: Option<std::sync::Arc<dyn crate::server::TaskStore>>,
    queue_manager: Option<std::sync::Arc<dyn crate::server::QueueManager>>,
    push_notifier: Option<std::sync::Arc<dyn crate::server::PushNotifier>>,
    agent_card: Option<AgentCard>,
    cors_enabled: bool,
    config: RuntimeConfig,
}

#[cfg(feature = "server")]
impl ServerBuilder {
    /// Create a new server builder with the given agent executor.
    pub fn new(executor: std::sync::Arc<dyn crate::server::AgentExecutor>) -> Self {
        Self {
            executor,
            task_store: None,
            queue_manager: None,
            push_notifier: None,
            agent_card: None,
            cors_enabled: false,
            config: RuntimeConfig::default(),
        }
    }

    /// Set the task store implementation.
    pub fn with_task_store(mut self, store: std::sync::Arc<dyn crate::server::TaskStore>) -> Self {
        self.task_store = Some(store);
        self
    }

    /// Set the queue manager implementation. Defaults to an
    /// [`crate::server::InMemoryQueueManager`] sized per [`RuntimeConfig::event_queue_max_size`].
    pub fn with_queue_manager(
        mut self,
        queue_manager: std::sync::Arc<dyn crate::server::QueueManager>,
    ) -> Self {
        self.queue_manager = Some(queue_manager);
        self
    }

    /// Set the push notifier implementation. Defaults to an
    /// [`crate::server::HttpPushNotifier`] using `reqwest`.
    pub fn with_push_notifier(
        mut self,
        push_notifier: std::sync::Arc<dyn crate::server::PushNotifier>,
    ) -> Self {
        self.push_notifier = Some(push_notifier);
        self
    }

    /// Configure the agent card using a builder callback.
    pub fn with_agent_card<F>(mut self, f: F) -> Self
    where
        F: FnOnce(AgentCardBuilder) -> AgentCardBuilder,
    {
        let builder = AgentCardBuilder::new("A2A Agent", "An A2A-compatible agent", "1.0.0");
        let builder = f(builder);
        self.agent_card = Some(builder.build());
        self
    }

    /// Set the agent card directly.
    pub fn with_agent_card_direct(mut self, card: AgentCard) -> Self {
        self.agent_card = Some(card);
        self
    }

    /// Enable or disable CORS middleware.
    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.cors_enabled = enabled;
        self
    }

    /// Override the full runtime configuration surface in one call.
    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the maximum per-task event queue size.
    pub fn with_event_queue_max_size(mut self, max_size: usize) -> Self {
        self.config.event_queue_max_size = max_size;
        self
    }

    /// Set how long `consume_one` waits for an event before giving up.
    pub fn with_consumer_poll_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.consumer_poll_timeout = Some(timeout);
        self
    }

    /// Set the HTTP timeout applied to push notification webhook requests.
    pub fn with_push_notifier_http_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.push_notifier_http_timeout = timeout;
        self
    }

    /// Set the path the agent card is served at.
    pub fn with_agent_card_path(mut self, path: impl Into<String>) -> Self {
        self.config.agent_card_path = path.into();
        self
    }

    /// Build the axum router.
    pub fn build(self) -> axum::Router {
        use crate::server::{
            a2a_router, DefaultRequestHandler, HttpPushNotifier, InMemoryQueueManager,
            InMemoryTaskStore, InMemoryTaskPushNotificationConfigStore,
        };
        use std::sync::Arc;

        let store = self
            .task_store
            .unwrap_or_else(|| Arc::new(InMemoryTaskStore::new()));
        let queue_manager = self
            .queue_manager
            .unwrap_or_else(|| Arc::new(InMemoryQueueManager::with_capacity(self.config.event_queue_max_size)));
        let push_notifier = self.push_notifier.unwrap_or_else(|| {
            Arc::new(HttpPushNotifier::new(self.config.push_notifier_http_timeout))
        });
        let push_config_store = Arc::new(InMemoryTaskPushNotificationConfigStore::new());

        let handler = Arc::new(DefaultRequestHandler::new(
            self.executor,
            store,
            queue_manager,
            push_notifier,
            push_config_store,
            self.config.consumer_poll_timeout,
        ));
        let card = self.agent_card.unwrap_or_else(|| {
            AgentCardBuilder::new("A2A Agent", "An A2A-compatible agent", "1.0.0").build()
        });

        let mut router = a2a_router(handler, card, self.config.agent_card_path.clone());

        if self.cors_enabled {
            use tower_http::cors::CorsLayer;
            router = router.layer(CorsLayer::permissive());
        }

        router
    }
}
