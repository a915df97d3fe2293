//! Message — communication units between agents in A2A.
//!
//! A Message contains one or more Parts (text, file, or structured data)
//! and has a role indicating whether it came from the user (client agent)
//! or the remote agent. Replies carry the context id of the message they
//! answer so multi-turn callers can correlate them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A message exchanged between agents.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier for this message.
    pub message_id: String,

    /// Role of the sender.
    pub role: MessageRole,

    /// Content parts of the message.
    pub parts: Vec<MessagePart>,

    /// Conversation context this message belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    /// Optional metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Message {
    /// Create a message from the user (client agent).
    pub fn user(parts: Vec<MessagePart>) -> Self {
        Self {
            message_id: Uuid::new_v4().to_string(),
            role: MessageRole::User,
            parts,
            context_id: None,
            metadata: None,
        }
    }

    /// Create a message from the remote agent.
    pub fn agent(parts: Vec<MessagePart>) -> Self {
        Self {
            message_id: Uuid::new_v4().to_string(),
            role: MessageRole::Agent,
            parts,
            context_id: None,
            metadata: None,
        }
    }

    /// Convenience: create a user message with a single text part.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::user(vec![MessagePart::text(text)])
    }

    /// Convenience: create an agent message with a single text part.
    pub fn agent_text(text: impl Into<String>) -> Self {
        Self::agent(vec![MessagePart::text(text)])
    }

    /// Set the conversation context id.
    pub fn with_context(mut self, context_id: Option<String>) -> Self {
        self.context_id = context_id;
        self
    }

    /// Extract all text content from this message.
    pub fn text_content(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                MessagePart::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The role of a message sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The client agent (sender).
    User,
    /// The remote agent (responder).
    Agent,
}

/// A part of a message — a fully-formed piece of content.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum MessagePart {
    /// Plain text content.
    #[serde(rename = "text")]
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        media_type: Option<String>,
    },

    /// File content (inline or by reference).
    #[serde(rename = "file")]
    File { file: FilePart },

    /// Structured data (JSON or other).
    #[serde(rename = "data")]
    Data { data: DataPart },
}

impl MessagePart {
    /// Create a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            media_type: None,
        }
    }

    /// Create a file part from inline bytes.
    pub fn file_inline(
        name: impl Into<String>,
        media_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        use base64::Engine;
        Self::File {
            file: FilePart {
                name: Some(name.into()),
                media_type: Some(media_type.into()),
                data: Some(base64::engine::general_purpose::STANDARD.encode(data)),
                url: None,
            },
        }
    }

    /// Create a file part from a URL reference.
    pub fn file_url(url: impl Into<String>, name: Option<String>) -> Self {
        Self::File {
            file: FilePart {
                name,
                media_type: None,
                data: None,
                url: Some(url.into()),
            },
        }
    }

    /// Create a structured data part.
    pub fn data(value: serde_json::Value, media_type: Option<String>) -> Self {
        Self::Data {
            data: DataPart { value, media_type },
        }
    }
}

/// File content — either inline (base64) or by URL reference.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilePart {
    /// Optional filename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// MIME type of the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    /// Base64-encoded inline data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// URL to the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Structured data content.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataPart {
    /// The structured data value.
    pub value: serde_json::Value,

    /// MIME type (e.g., "application/json").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}
