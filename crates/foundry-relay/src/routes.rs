//! Route definitions for the relay.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the relay router with the A2A endpoint mounted at `base_path`.
pub fn create_router(state: AppState, base_path: &str) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(handlers::healthz))
        // Discovery — the card is served at both well-known locations
        .route("/.well-known/agent-card.json", get(handlers::agent_card))
        .route(
            &format!("{base_path}/.well-known/agent-card.json"),
            get(handlers::agent_card),
        )
        // A2A message endpoint
        .route(base_path, post(handlers::a2a_message))
        // OpenAI-compatible chat completions
        .route("/v1/chat/completions", post(handlers::chat_completions))
        // Demo utility endpoints (tool targets)
        .route("/api/weather/:city", get(handlers::weather))
        .route("/api/calculate", post(handlers::calculate))
        .route("/api/time", get(handlers::time))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use foundry_core::{ChatClient, Credential, RelaySettings};
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_state(upstream: &str) -> AppState {
        let chat =
            ChatClient::new(upstream, "gpt-4o", Credential::ApiKey("test".into())).unwrap();
        AppState::new(&RelaySettings::default(), chat).unwrap()
    }

    fn test_router(upstream: &str) -> Router {
        create_router(test_state(upstream), "/a2a")
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    async fn mount_chat_success(server: &MockServer, reply: &str) {
        Mock::given(method("POST"))
            .and(path("/openai/deployments/gpt-4o/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-xyz",
                "choices": [{"message": {"role": "assistant", "content": reply}}],
                "usage": {"prompt_tokens": 9, "completion_tokens": 3, "total_tokens": 12},
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_healthz_has_no_downstream_dependency() {
        // Upstream URL points nowhere reachable; healthz must still answer.
        let app = test_router("http://127.0.0.1:1");

        let response = app
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_agent_card_routes_are_byte_identical() {
        let app = test_router("http://127.0.0.1:1");

        let root = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/.well-known/agent-card.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let nested = app
            .oneshot(
                Request::builder()
                    .uri("/a2a/.well-known/agent-card.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(root.status(), StatusCode::OK);
        assert_eq!(nested.status(), StatusCode::OK);
        assert_eq!(body_bytes(root).await, body_bytes(nested).await);
    }

    #[tokio::test]
    async fn test_chat_completions_success() {
        let server = MockServer::start().await;
        mount_chat_success(&server, "Four.").await;

        let app = test_router(&server.uri());
        let request = Request::builder()
            .method("POST")
            .uri("/v1/chat/completions")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "messages": [{"role": "user", "content": "What is 2 + 2?"}],
                })
                .to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["object"], "chat.completion");
        assert_eq!(body["choices"][0]["message"]["content"], "Four.");
        assert!(!body["choices"][0]["message"]["content"]
            .as_str()
            .unwrap()
            .is_empty());
        assert_eq!(body["usage"]["total_tokens"], 12);
        assert!(body["id"].as_str().unwrap().starts_with("chatcmpl-"));
    }

    #[tokio::test]
    async fn test_chat_completions_masks_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let app = test_router(&server.uri());
        let request = Request::builder()
            .method("POST")
            .uri("/v1/chat/completions")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "messages": [{"role": "user", "content": "hello"}],
                })
                .to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        // Degraded body, never an error status.
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(
            body["choices"][0]["message"]["content"],
            "Something went wrong while generating a response."
        );
        assert_eq!(body["usage"]["total_tokens"], 0);
    }

    #[tokio::test]
    async fn test_a2a_message_send_replies_with_agent_message() {
        let server = MockServer::start().await;
        mount_chat_success(&server, "Hi! I relay chats.").await;

        let app = test_router(&server.uri());
        let request = Request::builder()
            .method("POST")
            .uri("/a2a")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "jsonrpc": "2.0",
                    "method": "message/send",
                    "params": {
                        "message": {
                            "messageId": "m-1",
                            "role": "user",
                            "contextId": "ctx-7",
                            "parts": [{"type": "text", "text": "Who are you?"}],
                        },
                    },
                    "id": 1,
                })
                .to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(body["error"].is_null());
        assert_eq!(body["result"]["role"], "agent");
        assert_eq!(body["result"]["contextId"], "ctx-7");
        assert_eq!(
            body["result"]["parts"][0]["text"],
            "Hi! I relay chats."
        );
    }

    #[tokio::test]
    async fn test_a2a_empty_text_gets_polite_reply() {
        let app = test_router("http://127.0.0.1:1");
        let request = Request::builder()
            .method("POST")
            .uri("/a2a")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "jsonrpc": "2.0",
                    "method": "message/send",
                    "params": {
                        "message": {
                            "messageId": "m-2",
                            "role": "user",
                            "parts": [],
                        },
                    },
                    "id": 2,
                })
                .to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let body: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(
            body["result"]["parts"][0]["text"],
            "I did not receive any text to process."
        );
    }

    #[tokio::test]
    async fn test_a2a_unknown_method_is_rpc_error() {
        let app = test_router("http://127.0.0.1:1");
        let request = Request::builder()
            .method("POST")
            .uri("/a2a")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "jsonrpc": "2.0",
                    "method": "tasks/get",
                    "id": 3,
                })
                .to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_weather_endpoint_static_lookup() {
        let app = test_router("http://127.0.0.1:1");
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/weather/tokyo")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["city"], "Tokyo");
        assert_eq!(body["condition"], "Cloudy");
    }
}
