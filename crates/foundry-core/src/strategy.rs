//! Agent strategy — the uniform surface over the four agent backends.
//!
//! The original demos carried four near-identical strategy classes; here a
//! single data-driven implementation satisfies the contract, with the agent
//! kind selecting only the creation payload and the default model. Ordering
//! (create before list/test before delete) is caller discipline, not
//! enforced here — each call is independent.

use async_trait::async_trait;
use tracing::Instrument;

use crate::agent::{sample_workflow_yaml, AgentDefinition, AgentKind, AgentVersion, ToolDefinition};
use crate::client::FoundryClient;
use crate::config::AgentModelSettings;
use crate::error::FoundryResult;
use crate::telemetry;

/// Uniform contract over remote agent registration and invocation.
#[async_trait]
pub trait AgentStrategy: Send + Sync {
    /// Which backend this strategy drives.
    fn kind(&self) -> AgentKind;

    /// Register a new agent version. Errors are recorded on the operation
    /// span and propagated unmodified.
    async fn create_agent(&self, name: &str, instructions: &str) -> FoundryResult<AgentVersion>;

    /// Drain the remote paged version list into memory.
    async fn list_agent_versions(&self, name: &str) -> FoundryResult<Vec<AgentVersion>>;

    /// Delete the named agent. A remote 404 becomes `Ok(false)`; any other
    /// failure is re-raised.
    async fn delete_agent(&self, name: &str) -> FoundryResult<bool>;

    /// Create a conversation, send one message to the named agent, and
    /// return the extracted output text.
    async fn test_agent(&self, name: &str, message: &str) -> FoundryResult<String>;
}

/// Data-driven strategy over the Foundry control plane.
#[derive(Debug, Clone)]
pub struct FoundryAgentStrategy {
    kind: AgentKind,
    client: FoundryClient,
    model: String,
    tools: Vec<ToolDefinition>,
    hosted_image: Option<String>,
}

impl FoundryAgentStrategy {
    /// Create a strategy for the given backend, picking the model assigned
    /// to that agent type.
    pub fn new(kind: AgentKind, client: FoundryClient, models: &AgentModelSettings) -> Self {
        let model = match kind {
            AgentKind::AgentService => models.agent_service.clone(),
            AgentKind::FoundryHosted => models.foundry_hosted.clone(),
            AgentKind::Custom => models.custom.clone(),
            AgentKind::Workflow => models.workflow.clone(),
        };
        Self {
            kind,
            client,
            model,
            tools: Vec::new(),
            hosted_image: None,
        }
    }

    /// Tools handed to custom agents at creation time.
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Container image reference for hosted agents.
    pub fn with_hosted_image(mut self, image: impl Into<String>) -> Self {
        self.hosted_image = Some(image.into());
        self
    }

    /// The model this strategy registers agents with.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the kind-specific creation payload. For workflow agents the
    /// `instructions` argument carries the workflow YAML; an empty value
    /// falls back to the sample workflow.
    fn definition(&self, name: &str, instructions: &str) -> AgentDefinition {
        match self.kind {
            AgentKind::AgentService => AgentDefinition::Prompt {
                model: self.model.clone(),
                instructions: instructions.to_string(),
            },
            AgentKind::FoundryHosted => AgentDefinition::Hosted {
                model: self.model.clone(),
                image: self
                    .hosted_image
                    .clone()
                    .unwrap_or_else(|| format!("foundry-relay:{name}")),
                instructions: Some(instructions.to_string()),
            },
            AgentKind::Custom => AgentDefinition::Custom {
                model: self.model.clone(),
                instructions: instructions.to_string(),
                tools: self.tools.clone(),
            },
            AgentKind::Workflow => AgentDefinition::Workflow {
                workflow_yaml: if instructions.trim().is_empty() {
                    sample_workflow_yaml(&format!("{name}-prompt"))
                } else {
                    instructions.to_string()
                },
            },
        }
    }
}

#[async_trait]
impl AgentStrategy for FoundryAgentStrategy {
    fn kind(&self) -> AgentKind {
        self.kind
    }

    async fn create_agent(&self, name: &str, instructions: &str) -> FoundryResult<AgentVersion> {
        let span = telemetry::agent_operation_span("create", name);

        tracing::info!(agent.name = %name, model = %self.model, kind = %self.kind, "Creating agent");

        let definition = self.definition(name, instructions);
        let description = match self.kind {
            AgentKind::Workflow => Some("Workflow agent created by the control-plane demo"),
            _ => None,
        };

        match self
            .client
            .create_agent_version(name, &definition, description)
            .instrument(span.clone())
            .await
        {
            Ok(version) => {
                tracing::info!(
                    agent.name = %version.name,
                    agent.version = %version.version,
                    "Agent created"
                );
                Ok(version)
            }
            Err(e) => {
                telemetry::record_error(&span, &e);
                tracing::error!(agent.name = %name, error = %e, "Agent creation failed");
                Err(e)
            }
        }
    }

    async fn list_agent_versions(&self, name: &str) -> FoundryResult<Vec<AgentVersion>> {
        let span = telemetry::agent_operation_span("list", name);

        match self
            .client
            .list_agent_versions(name)
            .instrument(span.clone())
            .await
        {
            Ok(versions) => {
                tracing::info!(agent.name = %name, count = versions.len(), "Fetched agent versions");
                Ok(versions)
            }
            Err(e) => {
                telemetry::record_error(&span, &e);
                Err(e)
            }
        }
    }

    async fn delete_agent(&self, name: &str) -> FoundryResult<bool> {
        let span = telemetry::agent_operation_span("delete", name);

        tracing::info!(agent.name = %name, "Deleting agent");

        match self
            .client
            .delete_agent(name)
            .instrument(span.clone())
            .await
        {
            Ok(()) => {
                tracing::info!(agent.name = %name, "Agent deleted");
                Ok(true)
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!(agent.name = %name, "Agent already gone");
                Ok(false)
            }
            Err(e) => {
                telemetry::record_error(&span, &e);
                tracing::error!(agent.name = %name, error = %e, "Agent deletion failed");
                Err(e)
            }
        }
    }

    async fn test_agent(&self, name: &str, message: &str) -> FoundryResult<String> {
        let span = telemetry::agent_operation_span("test", name);

        tracing::info!(agent.name = %name, "Testing agent");

        let result: FoundryResult<String> = async {
            let conversation = self.client.create_conversation().await?;
            self.client
                .create_agent_response(name, &conversation.id, message)
                .await
        }
        .instrument(span.clone())
        .await;

        match result {
            Ok(text) => {
                tracing::info!(agent.name = %name, "Received agent reply");
                Ok(text)
            }
            Err(e) => {
                telemetry::record_error(&span, &e);
                tracing::error!(agent.name = %name, error = %e, "Agent test failed");
                Err(e)
            }
        }
    }
}
