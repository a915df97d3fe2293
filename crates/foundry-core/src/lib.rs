//! # foundry-core
//!
//! Core SDK for the Foundry Agents demos.
//!
//! This crate provides the shared building blocks:
//! - Typed configuration for the control plane, chat backend, and relay
//! - Ambient credential resolution (API key or Azure CLI)
//! - The Foundry control-plane client (agent version CRUD + conversations)
//! - The Azure OpenAI chat-completion client
//! - The agent strategy contract and its data-driven implementation
//! - Observability via tracing + OpenTelemetry
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use foundry_core::{
//!     AgentKind, AgentModelSettings, AgentStrategy, Credential, FoundryAgentStrategy,
//!     FoundryClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FoundryClient::new(
//!         "https://example.services.ai.azure.com/api/projects/demo",
//!         Credential::from_env(),
//!     )?;
//!     let strategy = FoundryAgentStrategy::new(
//!         AgentKind::AgentService,
//!         client,
//!         &AgentModelSettings::default(),
//!     );
//!
//!     let version = strategy
//!         .create_agent("demo-agent-service", "You are a helpful assistant.")
//!         .await?;
//!     println!("registered {} v{}", version.name, version.version);
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod chat;
pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod strategy;
pub mod telemetry;

// Re-exports
pub use agent::{sample_workflow_yaml, AgentDefinition, AgentKind, AgentVersion, ToolDefinition};
pub use chat::{ChatClient, ChatMessage, ChatOutcome, ChatUsage};
pub use client::{Conversation, FoundryClient};
pub use config::{
    AgentModelSettings, FoundryConfig, FoundrySettings, OpenAIOptions, RelaySettings,
    TelemetryConfig,
};
pub use credential::Credential;
pub use error::{FoundryError, FoundryResult};
pub use strategy::{AgentStrategy, FoundryAgentStrategy};

// Re-export a2a-wire types for convenience
pub use a2a_wire;
