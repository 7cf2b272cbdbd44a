//! Data models and structures
//!
//! Defines the core data structures for validated chat requests, routed
//! operations, normalized generation results, and environment configuration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "system" => Ok(Role::System),
            _ => Err(()),
        }
    }
}

/// Requested generation kind. Video is accepted but answered with a fixed
/// placeholder, never an upstream call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Text,
    Image,
    Video,
}

impl FromStr for Mode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(Mode::Text),
            "image" => Ok(Mode::Image),
            "video" => Ok(Mode::Video),
            _ => Err(()),
        }
    }
}

/// One turn of conversation. Content is non-empty once validated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Which accepted body shape produced the request.
///
/// `Multi` is the `messages` list form, `Single` the bare `message` form.
/// The single form gets a fixed system preamble prepended for text mode and
/// omits the `model` field in success bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestVariant {
    Multi,
    Single,
}

/// A validated inbound request, ready for routing. Built once per invocation
/// from untrusted JSON and discarded when the envelope is produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub mode: Mode,
    pub variant: RequestVariant,
}

/// Chat-completion call parameters produced by the router.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPayload {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

/// Content kind tag in success bodies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Image,
    Video,
}

/// Normalized success body: `{"type":...,"content":...,"model"?:...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationResult {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub chat_model: String,
    pub image_model: String,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// A missing API key is not a startup failure: the dispatcher reports it
    /// as a 500 envelope per invocation instead.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            chat_model: std::env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            image_model: std::env::var("IMAGE_MODEL").unwrap_or_else(|_| "dall-e-3".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            chat_model: "gpt-4o-mini".to_string(),
            image_model: "dall-e-3".to_string(),
        }
    }
}
