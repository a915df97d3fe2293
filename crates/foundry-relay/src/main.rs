//! foundry-relay — A2A and OpenAI-compatible HTTP front for one Azure
//! OpenAI chat deployment.

mod handlers;
mod routes;
mod state;

use anyhow::Context;
use foundry_core::{telemetry, ChatClient, Credential, FoundryConfig};

use crate::routes::create_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = FoundryConfig::load().context("failed to load configuration")?;
    config
        .openai
        .validate()
        .context("relay requires a chat deployment")?;

    telemetry::init_telemetry("foundry-relay", &config.relay.agent_id, &config.telemetry)?;

    let credential = Credential::from_env();
    let chat = ChatClient::new(
        &config.openai.endpoint,
        &config.openai.deployment_name,
        credential,
    )?;

    let base_path = config.relay.normalized_base_path();
    let state = AppState::new(&config.relay, chat)?;
    let app = create_router(state, &base_path);

    let addr = format!("0.0.0.0:{}", config.relay.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        addr = %addr,
        base_path = %base_path,
        agent_url = %config.relay.agent_url(),
        deployment = %config.openai.deployment_name,
        "Relay listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
