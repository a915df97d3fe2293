//! Agent Card — the self-describing metadata document for agent discovery.
//!
//! Every A2A-compatible agent publishes an Agent Card at:
//!   `/.well-known/agent-card.json`
//!
//! The card names the agent, points at its message endpoint, and declares
//! which input/output modes and optional capabilities it supports.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{A2AError, A2AResult};

/// An A2A Agent Card — metadata describing an agent and where to reach it.
///
/// Published at `/.well-known/agent-card.json` for discovery.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    /// Human-readable name of the agent.
    pub name: String,

    /// Description of what the agent does.
    pub description: String,

    /// The agent's message endpoint (base path included).
    pub url: String,

    /// Semantic version of the agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Content modes accepted by default (e.g. "text").
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_input_modes: Vec<String>,

    /// Content modes produced by default.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_output_modes: Vec<String>,

    /// Capabilities declared by this agent.
    #[serde(default)]
    pub capabilities: AgentCapabilities,
}

impl AgentCard {
    /// Build a card for a plain text-in/text-out agent at `url`.
    pub fn text_agent(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            version: Some("1.0.0".into()),
            default_input_modes: vec!["text".into()],
            default_output_modes: vec!["text".into()],
            capabilities: AgentCapabilities::default(),
        }
    }

    /// Discover an agent by fetching its Agent Card from the well-known endpoint.
    ///
    /// Fetches `{base_url}/.well-known/agent-card.json`.
    pub async fn discover(base_url: &str) -> A2AResult<Self> {
        let url = format!(
            "{}/.well-known/agent-card.json",
            base_url.trim_end_matches('/')
        );

        tracing::info!(url = %url, "Discovering A2A agent");

        let response = reqwest::get(&url)
            .await
            .map_err(|e| A2AError::DiscoveryFailed(format!("Failed to fetch agent card: {e}")))?;

        if !response.status().is_success() {
            return Err(A2AError::DiscoveryFailed(format!(
                "Agent card endpoint returned {}",
                response.status()
            )));
        }

        let card: AgentCard = response
            .json()
            .await
            .map_err(|e| A2AError::InvalidAgentCard(format!("Failed to parse agent card: {e}")))?;

        card.validate()?;

        tracing::info!(name = %card.name, "Discovered A2A agent");

        Ok(card)
    }

    /// Validate the agent card has required fields.
    pub fn validate(&self) -> A2AResult<()> {
        if self.name.is_empty() {
            return Err(A2AError::InvalidAgentCard("name is required".into()));
        }
        if self.description.is_empty() {
            return Err(A2AError::InvalidAgentCard(
                "description is required".into(),
            ));
        }
        if self.url.is_empty() {
            return Err(A2AError::InvalidAgentCard("url is required".into()));
        }
        Ok(())
    }

    /// Check if this agent supports streaming.
    pub fn supports_streaming(&self) -> bool {
        self.capabilities.streaming
    }
}

/// Capabilities declared by the agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    /// Whether the agent supports SSE streaming.
    #[serde(default)]
    pub streaming: bool,

    /// Whether the agent supports push notifications (webhooks).
    #[serde(default)]
    pub push_notifications: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_agent_card() {
        let card = AgentCard::text_agent(
            "A2A Chat Agent",
            "Uses Azure OpenAI to answer chat requests.",
            "http://localhost:5230/a2a",
        );

        let json = serde_json::to_string_pretty(&card).unwrap();
        assert!(json.contains("A2A Chat Agent"));
        assert!(json.contains("defaultInputModes"));

        let parsed: AgentCard = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, "A2A Chat Agent");
        assert_eq!(parsed.default_input_modes, vec!["text"]);
        assert!(!parsed.capabilities.streaming);
    }

    #[test]
    fn test_validate_agent_card() {
        let mut card = AgentCard {
            name: "".into(),
            description: "test".into(),
            url: "".into(),
            version: None,
            default_input_modes: vec![],
            default_output_modes: vec![],
            capabilities: Default::default(),
        };

        assert!(card.validate().is_err());

        card.name = "test-agent".into();
        assert!(card.validate().is_err()); // still missing the url

        card.url = "http://localhost:5230/a2a".into();
        assert!(card.validate().is_ok());
    }
}
