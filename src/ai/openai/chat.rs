use super::client::OpenAiHttpClient;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, WireMessage};
use crate::ai::ChatService;
use crate::models::ChatPayload;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct OpenAiChatClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiChatClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: OpenAiHttpClient::new(api_key, Duration::from_secs(30)),
            model,
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl ChatService for OpenAiChatClient {
    async fn complete(&self, payload: ChatPayload) -> Result<String> {
        tracing::debug!("Sending chat completion request to OpenAI");

        let messages = payload
            .messages
            .into_iter()
            .map(|m| WireMessage {
                role: m.role.as_str().to_string(),
                content: Some(m.content),
            })
            .collect();

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: payload.max_tokens,
            temperature: payload.temperature,
        };

        let response: ChatCompletionResponse =
            self.http.post("/v1/chat/completions", &request).await?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                Error::UnexpectedResponse("no assistant message in chat response".to_string())
            })
    }
}
