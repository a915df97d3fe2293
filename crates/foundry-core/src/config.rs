//! Configuration for the Foundry Agents demos.
//!
//! Settings are read from an optional `foundry.toml` in the working
//! directory, then overridden by environment variables. Empty environment
//! values are treated as unset so that blank entries in container manifests
//! do not shadow the file-based configuration.

use serde::{Deserialize, Serialize};

use crate::error::{FoundryError, FoundryResult};

/// Top-level configuration — typically stored at `./foundry.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoundryConfig {
    /// Azure AI Foundry control-plane settings.
    #[serde(default)]
    pub foundry: FoundrySettings,

    /// Azure OpenAI chat-completion settings.
    #[serde(default)]
    pub openai: OpenAIOptions,

    /// Relay host settings.
    #[serde(default)]
    pub relay: RelaySettings,

    /// Telemetry configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl FoundryConfig {
    /// Load `./foundry.toml` if present, then apply environment overrides.
    pub fn load() -> FoundryResult<Self> {
        let mut config = match std::fs::read_to_string("foundry.toml") {
            Ok(text) => toml::from_str(&text)
                .map_err(|e| FoundryError::MissingConfig(format!("foundry.toml: {e}")))?,
            Err(_) => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Some(v) = env_non_empty("AZURE_AI_PROJECT_ENDPOINT") {
            self.foundry.project_endpoint = v;
        }
        if let Some(v) = env_non_empty("AZURE_OPENAI_ENDPOINT") {
            self.openai.endpoint = v;
        }
        if let Some(v) = env_non_empty("AZURE_OPENAI_DEPLOYMENT_NAME") {
            self.openai.deployment_name = v;
        }
        if let Some(v) = env_non_empty("AGENT_BASE_PATH") {
            self.relay.base_path = v;
        }
        if let Some(v) = env_non_empty("AGENT_PUBLIC_BASE_URL") {
            self.relay.public_base_url = v;
        }
        if let Some(v) = env_non_empty("OTEL_EXPORTER_OTLP_ENDPOINT") {
            self.telemetry.otlp_endpoint = v;
            self.telemetry.enabled = true;
        }
        // An Application Insights connection string simply switches the
        // exporter on; spans still leave through the OTLP pipeline.
        if env_non_empty("APPLICATIONINSIGHTS_CONNECTION_STRING").is_some() {
            self.telemetry.enabled = true;
        }
    }
}

/// Read an environment variable, treating empty/whitespace values as unset.
fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Azure AI Foundry control-plane settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoundrySettings {
    /// Foundry project endpoint.
    #[serde(default)]
    pub project_endpoint: String,

    /// Per-agent-type model assignments.
    #[serde(default)]
    pub models: AgentModelSettings,
}

impl Default for FoundrySettings {
    fn default() -> Self {
        Self {
            project_endpoint: String::new(),
            models: AgentModelSettings::default(),
        }
    }
}

impl FoundrySettings {
    /// Fail fast when the control-plane endpoint is not configured.
    pub fn validate(&self) -> FoundryResult<()> {
        if self.project_endpoint.trim().is_empty() {
            return Err(FoundryError::MissingConfig(
                "foundry.project_endpoint (AZURE_AI_PROJECT_ENDPOINT) is required".into(),
            ));
        }
        Ok(())
    }
}

/// Model deployment names per agent type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentModelSettings {
    #[serde(default = "default_model")]
    pub agent_service: String,

    #[serde(default = "default_mini_model")]
    pub foundry_hosted: String,

    #[serde(default = "default_model")]
    pub custom: String,

    #[serde(default = "default_model")]
    pub workflow: String,
}

impl Default for AgentModelSettings {
    fn default() -> Self {
        Self {
            agent_service: default_model(),
            foundry_hosted: default_mini_model(),
            custom: default_model(),
            workflow: default_model(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o".into()
}

fn default_mini_model() -> String {
    "gpt-4o-mini".into()
}

/// Azure OpenAI chat-completion settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAIOptions {
    /// Azure OpenAI resource endpoint.
    #[serde(default)]
    pub endpoint: String,

    /// Chat model deployment name.
    #[serde(default)]
    pub deployment_name: String,
}

impl OpenAIOptions {
    /// Both values are required before any client can be constructed.
    pub fn validate(&self) -> FoundryResult<()> {
        if self.endpoint.trim().is_empty() {
            return Err(FoundryError::MissingConfig(
                "openai.endpoint (AZURE_OPENAI_ENDPOINT) is required".into(),
            ));
        }
        if self.deployment_name.trim().is_empty() {
            return Err(FoundryError::MissingConfig(
                "openai.deployment_name (AZURE_OPENAI_DEPLOYMENT_NAME) is required".into(),
            ));
        }
        Ok(())
    }
}

/// Relay host settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaySettings {
    /// Base path the A2A endpoint is mounted at.
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Public base URL advertised in the agent card.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Agent identifier stamped on telemetry.
    #[serde(default = "default_agent_id")]
    pub agent_id: String,

    /// Port the relay listens on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            public_base_url: default_public_base_url(),
            agent_id: default_agent_id(),
            port: default_port(),
        }
    }
}

impl RelaySettings {
    /// Base path with a guaranteed leading slash and no trailing slash.
    pub fn normalized_base_path(&self) -> String {
        normalize_base_path(&self.base_path)
    }

    /// Full public URL of the agent endpoint, as advertised in the card.
    pub fn agent_url(&self) -> String {
        format!(
            "{}{}",
            self.public_base_url.trim_end_matches('/'),
            self.normalized_base_path()
        )
    }
}

/// Normalize a configured base path to `/segment` form.
pub fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return "/a2a".into();
    }
    if trimmed.starts_with('/') {
        trimmed.into()
    } else {
        format!("/{trimmed}")
    }
}

fn default_base_path() -> String {
    "/a2a".into()
}

fn default_public_base_url() -> String {
    "http://localhost:5230".into()
}

fn default_agent_id() -> String {
    "a2a-chat-agent".into()
}

fn default_port() -> u16 {
    5230
}

/// Telemetry/observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether to export spans.
    #[serde(default)]
    pub enabled: bool,

    /// OTLP exporter endpoint.
    #[serde(default = "default_otlp_endpoint")]
    pub otlp_endpoint: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            otlp_endpoint: default_otlp_endpoint(),
        }
    }
}

fn default_otlp_endpoint() -> String {
    "http://localhost:4317".into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    // Tests that touch process environment variables take this lock so they
    // cannot interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_env_overrides_apply() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var(
            "AZURE_AI_PROJECT_ENDPOINT",
            "https://example.services.ai.azure.com/api/projects/demo",
        );
        std::env::set_var("AGENT_BASE_PATH", "/agents/chat");
        std::env::set_var("OTEL_EXPORTER_OTLP_ENDPOINT", "http://collector:4317");

        let mut config = FoundryConfig::default();
        config.apply_env();

        assert_eq!(
            config.foundry.project_endpoint,
            "https://example.services.ai.azure.com/api/projects/demo"
        );
        assert_eq!(config.relay.base_path, "/agents/chat");
        assert_eq!(config.telemetry.otlp_endpoint, "http://collector:4317");
        // Pointing an exporter somewhere switches it on.
        assert!(config.telemetry.enabled);

        std::env::remove_var("AZURE_AI_PROJECT_ENDPOINT");
        std::env::remove_var("AGENT_BASE_PATH");
        std::env::remove_var("OTEL_EXPORTER_OTLP_ENDPOINT");
    }

    #[test]
    fn test_empty_env_values_are_treated_as_unset() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("AZURE_OPENAI_ENDPOINT", "   ");
        std::env::set_var("AZURE_OPENAI_DEPLOYMENT_NAME", "");

        let mut config = FoundryConfig::default();
        config.openai.endpoint = "https://example.openai.azure.com".into();
        config.openai.deployment_name = "gpt-4o".into();
        config.apply_env();

        // Blank entries in a container manifest must not shadow the file.
        assert_eq!(config.openai.endpoint, "https://example.openai.azure.com");
        assert_eq!(config.openai.deployment_name, "gpt-4o");

        std::env::remove_var("AZURE_OPENAI_ENDPOINT");
        std::env::remove_var("AZURE_OPENAI_DEPLOYMENT_NAME");
    }

    #[test]
    fn test_defaults() {
        let config = FoundryConfig::default();
        assert_eq!(config.foundry.models.agent_service, "gpt-4o");
        assert_eq!(config.foundry.models.foundry_hosted, "gpt-4o-mini");
        assert_eq!(config.relay.base_path, "/a2a");
        assert_eq!(config.relay.public_base_url, "http://localhost:5230");
        assert!(!config.telemetry.enabled);
    }

    #[test]
    fn test_base_path_normalization() {
        assert_eq!(normalize_base_path("a2a"), "/a2a");
        assert_eq!(normalize_base_path("/a2a"), "/a2a");
        assert_eq!(normalize_base_path("/agents/chat/"), "/agents/chat");
        assert_eq!(normalize_base_path("  "), "/a2a");
    }

    #[test]
    fn test_agent_url_joins_without_double_slash() {
        let relay = RelaySettings {
            public_base_url: "http://localhost:5230/".into(),
            base_path: "a2a".into(),
            ..Default::default()
        };
        assert_eq!(relay.agent_url(), "http://localhost:5230/a2a");
    }

    #[test]
    fn test_openai_options_validation() {
        let mut options = OpenAIOptions::default();
        assert!(options.validate().is_err());

        options.endpoint = "https://example.openai.azure.com".into();
        assert!(options.validate().is_err()); // deployment still missing

        options.deployment_name = "gpt-4o".into();
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_toml_roundtrip() {
        let text = r#"
            [openai]
            endpoint = "https://example.openai.azure.com"
            deployment_name = "gpt-4o"

            [foundry]
            project_endpoint = "https://example.services.ai.azure.com/api/projects/demo"

            [relay]
            base_path = "agents/chat"
        "#;
        let config: FoundryConfig = toml::from_str(text).unwrap();
        assert_eq!(config.openai.deployment_name, "gpt-4o");
        assert_eq!(config.relay.normalized_base_path(), "/agents/chat");
        assert_eq!(config.foundry.models.workflow, "gpt-4o");
    }
}
