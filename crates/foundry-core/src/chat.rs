//! Azure OpenAI chat-completion client.
//!
//! A single-deployment binding over the vendor's chat-completions JSON wire
//! format. Request and response shapes are passed through untouched so the
//! relay can re-expose them OpenAI-compatibly.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use crate::credential::Credential;
use crate::error::{FoundryError, FoundryResult};

/// Chat-completions API version.
const API_VERSION: &str = "2024-10-21";

/// One chat message in the OpenAI wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }
}

/// Token usage reported by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// The outcome of one chat-completion call.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// Response identifier assigned by the service.
    pub id: Option<String>,

    /// The assistant's reply text (may be empty).
    pub text: String,

    /// Token accounting.
    pub usage: ChatUsage,
}

#[derive(Debug, Deserialize)]
struct CompletionEnvelope {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    usage: ChatUsage,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client bound to one Azure OpenAI chat deployment.
#[derive(Debug, Clone)]
pub struct ChatClient {
    endpoint: Url,
    deployment: String,
    http: Client,
    credential: Credential,
}

impl ChatClient {
    /// Create a client for a deployment on an Azure OpenAI resource. The
    /// endpoint path is normalized with a trailing slash so a path-bearing
    /// endpoint keeps all of its segments when the request URL is joined.
    pub fn new(endpoint: &str, deployment: &str, credential: Credential) -> FoundryResult<Self> {
        Ok(Self {
            endpoint: crate::client::parse_base_url(endpoint)?,
            deployment: deployment.to_string(),
            http: Client::new(),
            credential,
        })
    }

    /// The deployment this client is bound to.
    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    /// Run one chat completion. Attempted exactly once; no retry policy.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f64,
        max_tokens: u32,
    ) -> FoundryResult<ChatOutcome> {
        let mut url = self.endpoint.join(&format!(
            "openai/deployments/{}/chat/completions",
            self.deployment
        ))?;
        url.query_pairs_mut().append_pair("api-version", API_VERSION);

        let body = json!({
            "messages": messages,
            "temperature": temperature,
            "max_tokens": max_tokens,
        });

        let builder = self.credential.authorize(self.http.post(url)).await?;
        let response = builder.json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FoundryError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: CompletionEnvelope = response.json().await?;
        let text = envelope
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        Ok(ChatOutcome {
            id: envelope.id,
            text: text.trim().to_string(),
            usage: envelope.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_complete_extracts_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/deployments/gpt-4o/chat/completions"))
            .and(query_param("api-version", API_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-abc",
                "choices": [
                    {"message": {"role": "assistant", "content": "  Hi there.  "}},
                ],
                "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16},
            })))
            .mount(&server)
            .await;

        let client =
            ChatClient::new(&server.uri(), "gpt-4o", Credential::ApiKey("test".into())).unwrap();
        let outcome = client
            .complete(&[ChatMessage::user("Hello")], 0.7, 800)
            .await
            .unwrap();
        assert_eq!(outcome.text, "Hi there.");
        assert_eq!(outcome.usage.total_tokens, 16);
        assert_eq!(outcome.id.as_deref(), Some("chatcmpl-abc"));
    }

    #[tokio::test]
    async fn test_path_bearing_endpoint_keeps_all_segments() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/svc/openai/deployments/gpt-4o/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "ok"}}],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let endpoint = format!("{}/svc", server.uri());
        let client =
            ChatClient::new(&endpoint, "gpt-4o", Credential::ApiKey("test".into())).unwrap();
        let outcome = client
            .complete(&[ChatMessage::user("Hello")], 0.7, 800)
            .await
            .unwrap();
        assert_eq!(outcome.text, "ok");
    }

    #[tokio::test]
    async fn test_complete_surfaces_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("throttled"))
            .mount(&server)
            .await;

        let client =
            ChatClient::new(&server.uri(), "gpt-4o", Credential::ApiKey("test".into())).unwrap();
        let err = client
            .complete(&[ChatMessage::user("Hello")], 0.7, 800)
            .await
            .unwrap_err();
        match err {
            FoundryError::Status { status, .. } => assert_eq!(status, 429),
            other => panic!("unexpected error: {other}"),
        }
    }
}
