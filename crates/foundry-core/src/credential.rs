//! Ambient credential resolution for Azure endpoints.
//!
//! Mirrors the chained-credential behavior of the original deployment: an
//! explicit API key wins when present, otherwise a token is requested from
//! the Azure CLI (`az account get-access-token`). Hosted environments that
//! inject a key keep working; local development falls back to `az login`
//! state.

use tokio::process::Command;

use crate::error::{FoundryError, FoundryResult};

/// Default resource scope for Azure AI / OpenAI data-plane calls.
pub const COGNITIVE_SERVICES_RESOURCE: &str = "https://cognitiveservices.azure.com";

/// An ambient credential for authenticating outbound Azure calls.
#[derive(Debug, Clone)]
pub enum Credential {
    /// A static API key, sent as the `api-key` header.
    ApiKey(String),

    /// A bearer token resolved through the Azure CLI.
    AzureCli {
        /// Resource the token is requested for.
        resource: String,
    },
}

impl Credential {
    /// Resolve from the environment: `AZURE_OPENAI_API_KEY` when set,
    /// otherwise the Azure CLI with the cognitive-services resource.
    pub fn from_env() -> Self {
        match std::env::var("AZURE_OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Self::ApiKey(key),
            _ => Self::AzureCli {
                resource: COGNITIVE_SERVICES_RESOURCE.into(),
            },
        }
    }

    /// Attach this credential to an outgoing request.
    pub async fn authorize(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> FoundryResult<reqwest::RequestBuilder> {
        match self {
            Credential::ApiKey(key) => Ok(builder.header("api-key", key.as_str())),
            Credential::AzureCli { resource } => {
                let token = azure_cli_token(resource).await?;
                Ok(builder.bearer_auth(token))
            }
        }
    }
}

/// Ask the Azure CLI for an access token.
async fn azure_cli_token(resource: &str) -> FoundryResult<String> {
    let output = Command::new("az")
        .args([
            "account",
            "get-access-token",
            "--resource",
            resource,
            "--query",
            "accessToken",
            "--output",
            "tsv",
        ])
        .output()
        .await
        .map_err(|e| FoundryError::Credential(format!("failed to run az: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FoundryError::Credential(format!(
            "az account get-access-token failed: {}",
            stderr.trim()
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(FoundryError::Credential(
            "az returned an empty access token (run `az login`)".into(),
        ));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_api_key_sets_header() {
        let credential = Credential::ApiKey("test-key".into());
        let client = reqwest::Client::new();
        let builder = client.get("http://localhost/ping");
        let request = credential
            .authorize(builder)
            .await
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.headers()["api-key"], "test-key");
    }
}
