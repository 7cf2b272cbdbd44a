//! AI service integration for chat and image generation
//!
//! Provides interfaces to OpenAI's chat completion and image generation
//! APIs, plus mock implementations for tests.

pub mod mock;
pub mod openai;

pub use mock::{MockChatClient, MockImageClient};
pub use openai::{OpenAiChatClient, OpenAiImageClient};

use crate::models::ChatPayload;
use crate::Result;
use async_trait::async_trait;

/// Chat completion provider. Returns the assistant's reply text.
#[async_trait]
pub trait ChatService: Send + Sync {
    async fn complete(&self, payload: ChatPayload) -> Result<String>;
}

/// Image generation provider. Returns the URL of the first generated image.
#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
