//! Invocation orchestration: ingress, credential gate, routing, upstream
//! call, and normalization into the response envelope.
//!
//! [`Dispatcher::handle`] is infallible: every failure is converted to an
//! envelope at this boundary and nothing propagates to the runtime.

use crate::ai::{ChatService, ImageGenerationService, OpenAiChatClient, OpenAiImageClient};
use crate::error::Error;
use crate::event::{HttpEvent, HttpResponse, RequestContext};
use crate::ingress::{self, IngressOutcome};
use crate::models::{ChatRequest, Config, ContentKind, GenerationResult, RequestVariant};
use crate::router::{self, Operation};
use crate::{prompts, Result};
use serde_json::json;
use tracing::{info, warn};

/// Injectable provider bundle, used by tests to substitute mocks.
pub struct Services {
    pub chat: Box<dyn ChatService>,
    pub image: Box<dyn ImageGenerationService>,
}

pub struct Dispatcher {
    services: Option<Services>,
    chat_model: String,
    image_model: String,
}

impl Dispatcher {
    /// Build a dispatcher from configuration. Provider clients exist only
    /// when the API key does; without it every invocation reports a
    /// configuration error and no outbound call is ever attempted.
    pub fn new(config: Config) -> Self {
        let services = config.openai_api_key.as_ref().map(|key| Services {
            chat: Box::new(OpenAiChatClient::new(key.clone(), config.chat_model.clone())),
            image: Box::new(OpenAiImageClient::new(key.clone(), config.image_model.clone())),
        });

        if services.is_none() {
            warn!("OPENAI_API_KEY not set; invocations will report a configuration error");
        }

        Self {
            services,
            chat_model: config.chat_model,
            image_model: config.image_model,
        }
    }

    /// Build a dispatcher from concrete service dependencies.
    pub fn with_services(services: Services) -> Self {
        let config = Config::default();
        Self {
            services: Some(services),
            chat_model: config.chat_model,
            image_model: config.image_model,
        }
    }

    /// A dispatcher with no credential, for exercising the configuration
    /// error path.
    pub fn without_credentials() -> Self {
        Self::new(Config::default())
    }

    /// Run one invocation. Always returns an envelope.
    pub async fn handle(&self, event: &HttpEvent, ctx: &RequestContext) -> HttpResponse {
        info!(
            "Handling {} invocation (request_id: {}, function: {})",
            event.http_method, ctx.request_id, ctx.function_name
        );

        let request = match ingress::normalize(event) {
            Ok(IngressOutcome::Reply(response)) => return response,
            Ok(IngressOutcome::Request(request)) => request,
            Err(err) => {
                warn!("Rejected invocation {}: {}", ctx.request_id, err);
                return error_envelope(&err);
            }
        };

        match self.invoke(&request).await {
            Ok(result) => HttpResponse::json(200, &result),
            Err(err) => {
                warn!("Invocation {} failed: {}", ctx.request_id, err);
                error_envelope(&err)
            }
        }
    }

    /// Execute the routed operation: at most one upstream call.
    async fn invoke(&self, request: &ChatRequest) -> Result<GenerationResult> {
        let services = self.services.as_ref().ok_or(Error::MissingApiKey)?;

        match router::route(request) {
            Operation::Chat(payload) => {
                let content = services.chat.complete(payload).await?;
                Ok(GenerationResult {
                    kind: ContentKind::Text,
                    content,
                    model: self.model_tag(request, &self.chat_model),
                })
            }
            Operation::Image { prompt } => {
                let content = services.image.generate(&prompt).await?;
                Ok(GenerationResult {
                    kind: ContentKind::Image,
                    content,
                    model: self.model_tag(request, &self.image_model),
                })
            }
            Operation::VideoPlaceholder => Ok(GenerationResult {
                kind: ContentKind::Video,
                content: prompts::VIDEO_UNAVAILABLE.to_string(),
                model: Some("unavailable".to_string()),
            }),
        }
    }

    // The single-message form historically omits the model field.
    fn model_tag(&self, request: &ChatRequest, model: &str) -> Option<String> {
        match request.variant {
            RequestVariant::Multi => Some(model.to_string()),
            RequestVariant::Single => None,
        }
    }
}

fn error_envelope(err: &Error) -> HttpResponse {
    HttpResponse::json(err.status_code(), &json!({ "error": err.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockChatClient, MockImageClient};
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn ctx() -> RequestContext {
        RequestContext {
            request_id: "test-request".to_string(),
            function_name: "openai-chat-gateway".to_string(),
        }
    }

    fn body_json(response: &HttpResponse) -> Value {
        serde_json::from_str(&response.body).unwrap()
    }

    #[tokio::test]
    async fn test_image_mode_forwards_first_user_prompt() {
        let image = MockImageClient::new().with_url("https://cdn.example.com/fox.png");
        let dispatcher = Dispatcher::with_services(Services {
            chat: Box::new(MockChatClient::new()),
            image: Box::new(image.clone()),
        });

        let event = HttpEvent::post(
            r#"{"messages":[{"role":"system","content":"be brief"},{"role":"user","content":"a red fox"}],"mode":"image"}"#,
        );
        let response = dispatcher.handle(&event, &ctx()).await;

        assert_eq!(response.status_code, 200);
        let body = body_json(&response);
        assert_eq!(body["type"], "image");
        assert_eq!(body["content"], "https://cdn.example.com/fox.png");
        assert_eq!(body["model"], "dall-e-3");
        assert_eq!(image.last_prompt().as_deref(), Some("a red fox"));
    }

    #[tokio::test]
    async fn test_upstream_error_status_is_forwarded() {
        let chat = MockChatClient::new().with_upstream_error(429, "rate limited");
        let dispatcher = Dispatcher::with_services(Services {
            chat: Box::new(chat),
            image: Box::new(MockImageClient::new()),
        });

        let event = HttpEvent::post(r#"{"message":"hi","mode":"text"}"#);
        let response = dispatcher.handle(&event, &ctx()).await;

        assert_eq!(response.status_code, 429);
        let body = body_json(&response);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("OpenAI API error: rate limited"));
    }

    #[test]
    fn test_unexpected_response_maps_to_500() {
        let err = Error::UnexpectedResponse("no assistant message in chat response".to_string());
        let response = error_envelope(&err);
        assert_eq!(response.status_code, 500);
        assert!(body_json(&response)["error"]
            .as_str()
            .unwrap()
            .contains("no assistant message"));
    }

    #[tokio::test]
    async fn test_video_placeholder_is_stable_and_skips_providers() {
        let chat = MockChatClient::new();
        let image = MockImageClient::new();
        let dispatcher = Dispatcher::with_services(Services {
            chat: Box::new(chat.clone()),
            image: Box::new(image.clone()),
        });

        let first = dispatcher
            .handle(
                &HttpEvent::post(r#"{"message":"make a film","mode":"video"}"#),
                &ctx(),
            )
            .await;
        let second = dispatcher
            .handle(
                &HttpEvent::post(r#"{"message":"another film","mode":"video"}"#),
                &ctx(),
            )
            .await;

        assert_eq!(first.status_code, 200);
        let first_body = body_json(&first);
        let second_body = body_json(&second);
        assert_eq!(first_body["type"], "video");
        assert_eq!(first_body["model"], "unavailable");
        // Placeholder wording is fixed, independent of the message.
        assert_eq!(first_body["content"], second_body["content"]);

        assert_eq!(chat.get_call_count(), 0);
        assert_eq!(image.get_call_count(), 0);
    }
}
