//! # a2a-wire
//!
//! Agent-to-Agent (A2A) protocol support for the Foundry Agents demos:
//! the canonical data model (agent cards and messages) plus the JSON-RPC 2.0
//! HTTP binding used to talk to a running agent endpoint.
//!
//! An A2A agent publishes a self-describing card at
//! `/.well-known/agent-card.json` and accepts `message/send` requests at its
//! base path. This crate is shared between the relay server (which serves
//! both) and the CLI (which discovers and invokes deployed agents).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use a2a_wire::{A2AClient, AgentCard};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Discover a remote agent
//!     let card = AgentCard::discover("http://localhost:5230").await?;
//!     println!("Found: {}", card.name);
//!
//!     // Send it a message
//!     let client = A2AClient::new("http://localhost:5230/a2a")?;
//!     let reply = client.send_message_text("Hello there").await?;
//!     println!("{}", reply.text_content());
//!     Ok(())
//! }
//! ```

pub mod agent_card;
pub mod client;
pub mod error;
pub mod jsonrpc;
pub mod message;

// Re-export primary types
pub use agent_card::{AgentCapabilities, AgentCard};
pub use client::A2AClient;
pub use error::{A2AError, A2AResult};
pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId};
pub use message::{DataPart, FilePart, Message, MessagePart, MessageRole};
