use super::client::OpenAiHttpClient;
use super::types::{ImageGenerationRequest, ImageGenerationResponse};
use crate::ai::ImageGenerationService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct OpenAiImageClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        // Image generation is slower than chat; give it a longer timeout.
        Self {
            http: OpenAiHttpClient::new(api_key, Duration::from_secs(60)),
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
impl ImageGenerationService for OpenAiImageClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!("Sending image generation request to OpenAI");

        let request = ImageGenerationRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: "1024x1024".to_string(),
            quality: "standard".to_string(),
        };

        let response: ImageGenerationResponse =
            self.http.post("/v1/images/generations", &request).await?;

        response
            .data
            .first()
            .and_then(|item| item.url.clone())
            .ok_or_else(|| {
                Error::UnexpectedResponse("no image URL in generation response".to_string())
            })
    }
}
