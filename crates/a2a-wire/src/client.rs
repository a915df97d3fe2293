//! A2A Client — high-level client for invoking A2A-compatible agents.
//!
//! The client handles agent discovery and single-turn message exchange over
//! the JSON-RPC binding. Used by the CLI to call deployed relay agents.

use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::agent_card::AgentCard;
use crate::error::{A2AError, A2AResult};
use crate::message::Message;
use crate::jsonrpc::{JsonRpcRequest, JsonRpcResponse};

/// Client for communicating with a remote A2A agent endpoint.
#[derive(Debug, Clone)]
pub struct A2AClient {
    /// URL of the remote agent's message endpoint.
    endpoint: Url,

    /// The discovered agent card (populated after discover()).
    agent_card: Option<AgentCard>,

    /// HTTP client.
    http: Client,

    /// Optional bearer token for authentication.
    auth_token: Option<String>,
}

/// Parameters for the `message/send` operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageParams {
    /// The message to deliver.
    pub message: Message,

    /// Optional metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl A2AClient {
    /// Create a new A2A client pointed at an agent's message endpoint.
    pub fn new(endpoint: &str) -> A2AResult<Self> {
        Ok(Self {
            endpoint: Url::parse(endpoint)?,
            agent_card: None,
            http: Client::new(),
            auth_token: None,
        })
    }

    /// Set authentication token.
    pub fn with_auth(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Discover the remote agent by fetching its Agent Card.
    ///
    /// The card is fetched from the host's well-known location and cached
    /// on the client.
    pub async fn discover(&mut self) -> A2AResult<&AgentCard> {
        let mut base = self.endpoint.clone();
        base.set_path("");
        let card = AgentCard::discover(base.as_str()).await?;
        self.agent_card = Some(card);
        Ok(self
            .agent_card
            .as_ref()
            .ok_or_else(|| A2AError::DiscoveryFailed("card not cached".into()))?)
    }

    /// Get the cached agent card (call discover() first).
    pub fn agent_card(&self) -> Option<&AgentCard> {
        self.agent_card.as_ref()
    }

    /// Send a message to the remote agent and return its reply.
    ///
    /// A decoded reply that carries no text at all is rejected as
    /// [`A2AError::EmptyReply`]; the agents spoken to here are text-in,
    /// text-out.
    pub async fn send_message(&self, message: Message) -> A2AResult<Message> {
        let params = serde_json::to_value(SendMessageParams {
            message,
            metadata: None,
        })?;

        let rpc_request = JsonRpcRequest::send_message(params);
        let response = self.send_rpc(rpc_request).await?;
        let result = response.into_result().map_err(|e| A2AError::JsonRpc {
            code: e.code,
            message: e.message,
            data: e.data,
        })?;

        let reply: Message = serde_json::from_value(result)?;
        if reply.text_content().is_empty() {
            return Err(A2AError::EmptyReply(
                "agent reply contained no text".into(),
            ));
        }
        Ok(reply)
    }

    /// Convenience: send a simple text message and return the reply.
    pub async fn send_message_text(&self, text: &str) -> A2AResult<Message> {
        self.send_message(Message::user_text(text)).await
    }

    async fn send_rpc(&self, request: JsonRpcRequest) -> A2AResult<JsonRpcResponse> {
        let mut builder = self.http.post(self.endpoint.clone()).json(&request);
        if let Some(ref token) = self.auth_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_message_text() {
        let server = MockServer::start().await;

        let reply = Message::agent_text("pong");
        Mock::given(method("POST"))
            .and(path("/a2a"))
            .and(body_partial_json(serde_json::json!({
                "jsonrpc": "2.0",
                "method": "message/send",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0",
                "result": serde_json::to_value(&reply).unwrap(),
                "id": 1,
            })))
            .mount(&server)
            .await;

        let client = A2AClient::new(&format!("{}/a2a", server.uri())).unwrap();
        let message = client.send_message_text("ping").await.unwrap();
        assert_eq!(message.text_content(), "pong");
    }

    #[tokio::test]
    async fn test_send_message_rpc_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/a2a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0",
                "error": {"code": -32601, "message": "Method not found"},
                "id": 1,
            })))
            .mount(&server)
            .await;

        let client = A2AClient::new(&format!("{}/a2a", server.uri())).unwrap();
        let err = client.send_message_text("ping").await.unwrap_err();
        match err {
            A2AError::JsonRpc { code, .. } => assert_eq!(code, -32601),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_textless_reply_is_rejected() {
        let server = MockServer::start().await;

        let reply = Message::agent(vec![]);
        Mock::given(method("POST"))
            .and(path("/a2a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0",
                "result": serde_json::to_value(&reply).unwrap(),
                "id": 1,
            })))
            .mount(&server)
            .await;

        let client = A2AClient::new(&format!("{}/a2a", server.uri())).unwrap();
        let err = client.send_message_text("ping").await.unwrap_err();
        assert!(matches!(err, A2AError::EmptyReply(_)));
    }

    #[tokio::test]
    async fn test_discover_fetches_well_known_card() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/.well-known/agent-card.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "A2A Chat Agent",
                "description": "Uses Azure OpenAI to answer chat requests.",
                "url": format!("{}/a2a", server.uri()),
            })))
            .mount(&server)
            .await;

        let mut client = A2AClient::new(&format!("{}/a2a", server.uri())).unwrap();
        let card = client.discover().await.unwrap();
        assert_eq!(card.name, "A2A Chat Agent");
    }
}
