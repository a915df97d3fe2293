//! Foundry control-plane client.
//!
//! Thin HTTP binding over the agent-hosting API: agent version CRUD plus the
//! conversation/response calls used to exercise a registered agent. Every
//! call is a single request/response; paging is drained eagerly (demo scale).

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::agent::{AgentDefinition, AgentVersion};
use crate::credential::Credential;
use crate::error::{FoundryError, FoundryResult};

/// API version sent with every control-plane call.
const API_VERSION: &str = "2025-05-01";

/// Client for the Foundry agent control plane.
#[derive(Debug, Clone)]
pub struct FoundryClient {
    /// Project endpoint base URL.
    base_url: Url,

    /// HTTP client.
    http: Client,

    /// Ambient credential.
    credential: Credential,
}

/// Parse an endpoint, guaranteeing a trailing slash on its path. `Url::join`
/// resolves relative to the last `/`, so without this a project endpoint
/// like `https://host/api/projects/demo` would lose its final segment on
/// every joined request path.
pub(crate) fn parse_base_url(endpoint: &str) -> FoundryResult<Url> {
    let mut url = Url::parse(endpoint)?;
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }
    Ok(url)
}

/// A conversation resource created for a test run.
#[derive(Debug, Clone, Deserialize)]
pub struct Conversation {
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct VersionPage {
    #[serde(default)]
    data: Vec<AgentVersion>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    last_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    output: Vec<ResponseItem>,
}

#[derive(Debug, Deserialize)]
struct ResponseItem {
    #[serde(default)]
    content: Vec<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: String,
}

impl FoundryClient {
    /// Create a client for a Foundry project endpoint.
    pub fn new(endpoint: &str, credential: Credential) -> FoundryResult<Self> {
        Ok(Self {
            base_url: parse_base_url(endpoint)?,
            http: Client::new(),
            credential,
        })
    }

    // ── Agent Operations ─────────────────────────────────────

    /// Register a new version of the named agent.
    pub async fn create_agent_version(
        &self,
        name: &str,
        definition: &AgentDefinition,
        description: Option<&str>,
    ) -> FoundryResult<AgentVersion> {
        let url = self.url(&format!("/agents/{name}/versions"))?;
        let mut body = json!({ "definition": definition });
        if let Some(description) = description {
            body["description"] = json!(description);
        }

        let builder = self.http.post(url).json(&body);
        let response = self.send(builder).await?;
        Ok(response.json().await?)
    }

    /// List every version of the named agent, draining all pages.
    pub async fn list_agent_versions(&self, name: &str) -> FoundryResult<Vec<AgentVersion>> {
        let mut versions = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let mut url = self.url(&format!("/agents/{name}/versions"))?;
            if let Some(ref marker) = after {
                url.query_pairs_mut().append_pair("after", marker);
            }

            let response = self.send(self.http.get(url)).await?;
            let page: VersionPage = response.json().await?;
            versions.extend(page.data);

            match (page.has_more, page.last_id) {
                (true, Some(marker)) => after = Some(marker),
                _ => break,
            }
        }

        Ok(versions)
    }

    /// List registered agents (latest version of each).
    pub async fn list_agents(&self) -> FoundryResult<Vec<AgentVersion>> {
        let url = self.url("/agents")?;
        let response = self.send(self.http.get(url)).await?;
        let page: VersionPage = response.json().await?;
        Ok(page.data)
    }

    /// Delete the named agent. Surfaces the HTTP status so callers can
    /// special-case a remote 404.
    pub async fn delete_agent(&self, name: &str) -> FoundryResult<()> {
        let url = self.url(&format!("/agents/{name}"))?;
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    // ── Conversations & Responses ────────────────────────────

    /// Create a conversation resource to run a test exchange in.
    pub async fn create_conversation(&self) -> FoundryResult<Conversation> {
        let url = self.url("/conversations")?;
        let response = self.send(self.http.post(url).json(&json!({}))).await?;
        Ok(response.json().await?)
    }

    /// Send one message to the named agent inside a conversation and return
    /// the extracted output text.
    pub async fn create_agent_response(
        &self,
        agent_name: &str,
        conversation_id: &str,
        message: &str,
    ) -> FoundryResult<String> {
        let url = self.url("/responses")?;
        let body = json!({
            "agent": { "type": "agent_reference", "name": agent_name },
            "conversation": conversation_id,
            "input": [{ "role": "user", "content": message }],
        });

        let response = self.send(self.http.post(url).json(&body)).await?;
        let envelope: ResponseEnvelope = response.json().await?;

        let text = envelope
            .output
            .iter()
            .flat_map(|item| item.content.iter())
            .filter(|content| content.kind == "output_text")
            .map(|content| content.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            return Err(FoundryError::UnexpectedResponse(
                "response contained no output text".into(),
            ));
        }
        Ok(text)
    }

    // ── Internal ─────────────────────────────────────────────

    fn url(&self, path: &str) -> FoundryResult<Url> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(FoundryError::InvalidUrl)?;
        url.query_pairs_mut().append_pair("api-version", API_VERSION);
        Ok(url)
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> FoundryResult<reqwest::Response> {
        let builder = self.credential.authorize(builder).await?;
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FoundryError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentDefinition;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> FoundryClient {
        FoundryClient::new(&server.uri(), Credential::ApiKey("test".into())).unwrap()
    }

    #[tokio::test]
    async fn test_create_agent_version() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/agents/demo-agent-service/versions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "agt_1",
                "name": "demo-agent-service",
                "version": "1",
                "definition_type": "prompt",
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let definition = AgentDefinition::Prompt {
            model: "gpt-4o".into(),
            instructions: "You are a helpful assistant.".into(),
        };
        let version = client
            .create_agent_version("demo-agent-service", &definition, None)
            .await
            .unwrap();
        assert_eq!(version.version, "1");
        assert_eq!(version.definition_type.as_deref(), Some("prompt"));
    }

    #[tokio::test]
    async fn test_list_agent_versions_drains_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/agents/demo/versions"))
            .and(query_param("after", "agt_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"id": "agt_2", "name": "demo", "version": "2"}],
                "has_more": false,
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/agents/demo/versions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"id": "agt_1", "name": "demo", "version": "1"}],
                "has_more": true,
                "last_id": "agt_1",
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let versions = client.list_agent_versions("demo").await.unwrap();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].version, "1");
        assert_eq!(versions[1].version, "2");
    }

    #[tokio::test]
    async fn test_path_bearing_endpoint_keeps_project_segment() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/projects/proj1/agents/demo"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let endpoint = format!("{}/api/projects/proj1", server.uri());
        let client =
            FoundryClient::new(&endpoint, Credential::ApiKey("test".into())).unwrap();
        client.delete_agent("demo").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_agent_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/agents/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("agent not found"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.delete_agent("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_agent_response_extracts_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/conversations"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": "conv_1"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "output": [{
                    "content": [
                        {"type": "output_text", "text": "Hello!"},
                        {"type": "refusal", "text": "ignored"},
                    ],
                }],
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let conversation = client.create_conversation().await.unwrap();
        let text = client
            .create_agent_response("demo", &conversation.id, "Hi")
            .await
            .unwrap();
        assert_eq!(text, "Hello!");
    }
}
