//! Agent resources — the records exchanged with the Foundry control plane.
//!
//! An agent is a remote, cloud-hosted chat/task-execution resource. Creating
//! one registers a new immutable `AgentVersion`; this repository never holds
//! an authoritative copy, only transient references for display and cleanup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four remote agent-management backends the demos drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Agent Service (Foundry standard prompt agents).
    AgentService,
    /// Foundry Hosted Agent (fully managed container).
    FoundryHosted,
    /// Custom agent with caller-supplied tools.
    Custom,
    /// Workflow agent driven by a YAML definition.
    Workflow,
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentKind::AgentService => write!(f, "agent-service"),
            AgentKind::FoundryHosted => write!(f, "foundry-hosted"),
            AgentKind::Custom => write!(f, "custom"),
            AgentKind::Workflow => write!(f, "workflow"),
        }
    }
}

/// A registered agent version, as returned by the control plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentVersion {
    /// Unique identifier.
    pub id: String,

    /// Agent name (shared across versions).
    pub name: String,

    /// Version label assigned by the service.
    pub version: String,

    /// Definition-type tag (e.g. "prompt", "workflow").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_type: Option<String>,

    /// Description recorded at creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When this version was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// The kind-specific creation payload sent to the control plane.
///
/// One tagged enum instead of four parallel strategy classes: the variant
/// only selects how the definition body is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AgentDefinition {
    /// A plain prompt agent: model plus system instructions.
    Prompt { model: String, instructions: String },

    /// A fully managed hosted agent backed by a container image.
    Hosted {
        model: String,
        image: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        instructions: Option<String>,
    },

    /// A prompt agent with caller-supplied tools.
    Custom {
        model: String,
        instructions: String,
        tools: Vec<ToolDefinition>,
    },

    /// A multi-step workflow defined in YAML.
    Workflow { workflow_yaml: String },
}

impl AgentDefinition {
    /// The definition-type tag the control plane reports back.
    pub fn type_tag(&self) -> &'static str {
        match self {
            AgentDefinition::Prompt { .. } => "prompt",
            AgentDefinition::Hosted { .. } => "hosted",
            AgentDefinition::Custom { .. } => "custom",
            AgentDefinition::Workflow { .. } => "workflow",
        }
    }
}

/// A tool exposed to a custom agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name as presented to the model.
    pub name: String,

    /// What the tool does.
    pub description: String,

    /// HTTP endpoint backing the tool, when it is remote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Sample workflow YAML that invokes a prompt agent by name.
///
/// The shape follows the Foundry workflow schema: a conversation-start
/// trigger, an agent invocation, and the forwarded reply.
pub fn sample_workflow_yaml(prompt_agent_name: &str) -> String {
    format!(
        r#"kind: workflow
trigger:
  kind: OnConversationStart
  id: demo_workflow
actions:
  - kind: SendActivity
    id: welcome_message
    activity: "Starting the workflow..."

  - kind: InvokeAzureAgent
    id: call_prompt_agent
    description: "Invoke the prompt agent and collect its reply"
    agent:
      name: {prompt_agent_name}
    input:
      messages: "=System.LastMessageText"
    output:
      messages: Local.AgentResponse

  - kind: SendActivity
    id: send_response
    activity: "=Local.AgentResponse"

  - kind: EndConversation
    id: end_conversation
"#
    )
}
