//! Shared application state for the relay.

use std::sync::Arc;

use a2a_wire::AgentCard;
use foundry_core::{ChatClient, RelaySettings};

/// Process-wide state handed to every handler. Built once at startup;
/// read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    chat: ChatClient,
    agent_id: String,
    /// The serialized agent card, rendered once so both well-known routes
    /// serve byte-identical bodies.
    card_body: String,
}

impl AppState {
    /// Build the state from the relay settings and a chat client.
    pub fn new(relay: &RelaySettings, chat: ChatClient) -> anyhow::Result<Self> {
        let card = AgentCard::text_agent(
            "A2A Chat Agent",
            "Uses Azure OpenAI to answer chat requests.",
            relay.agent_url(),
        );
        card.validate()?;
        let card_body = serde_json::to_string(&card)?;

        Ok(Self {
            inner: Arc::new(Inner {
                chat,
                agent_id: relay.agent_id.clone(),
                card_body,
            }),
        })
    }

    pub fn chat(&self) -> &ChatClient {
        &self.inner.chat
    }

    pub fn agent_id(&self) -> &str {
        &self.inner.agent_id
    }

    pub fn card_body(&self) -> &str {
        &self.inner.card_body
    }
}
