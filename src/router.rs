//! Mode routing
//!
//! Pure mapping from a validated request to the upstream operation to
//! perform. Unknown modes cannot reach this point: [`Mode`] is a closed enum
//! and the ingress rejects anything outside it.

use crate::models::{ChatMessage, ChatPayload, ChatRequest, Mode, RequestVariant, Role};
use crate::prompts;

/// The upstream operation a request maps to.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Chat(ChatPayload),
    Image { prompt: String },
    /// Video has no upstream API; the dispatcher answers with a fixed
    /// placeholder and never makes a call.
    VideoPlaceholder,
}

pub fn route(request: &ChatRequest) -> Operation {
    match request.mode {
        Mode::Text => Operation::Chat(chat_payload(request)),
        Mode::Image => Operation::Image {
            prompt: image_prompt(request),
        },
        Mode::Video => Operation::VideoPlaceholder,
    }
}

fn chat_payload(request: &ChatRequest) -> ChatPayload {
    match request.variant {
        // Full history forwarded as-is.
        RequestVariant::Multi => ChatPayload {
            messages: request.messages.clone(),
            max_tokens: 1000,
            temperature: Some(0.7),
        },
        // Single message gets the fixed system preamble prepended.
        RequestVariant::Single => {
            let mut messages = vec![ChatMessage::new(Role::System, prompts::CHAT_SYSTEM)];
            messages.extend(request.messages.iter().cloned());
            ChatPayload {
                messages,
                max_tokens: 500,
                temperature: None,
            }
        }
    }
}

/// Image prompt: content of the first user-role message. An empty prompt is
/// forwarded as-is and rejected upstream.
fn image_prompt(request: &ChatRequest) -> String {
    request
        .messages
        .iter()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn multi(messages: Vec<ChatMessage>, mode: Mode) -> ChatRequest {
        ChatRequest {
            messages,
            mode,
            variant: RequestVariant::Multi,
        }
    }

    fn single(content: &str, mode: Mode) -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::new(Role::User, content)],
            mode,
            variant: RequestVariant::Single,
        }
    }

    #[test]
    fn test_multi_text_forwards_full_history() {
        let messages = vec![
            ChatMessage::new(Role::System, "be brief"),
            ChatMessage::new(Role::User, "hi"),
            ChatMessage::new(Role::Assistant, "hello"),
        ];
        let operation = route(&multi(messages.clone(), Mode::Text));

        match operation {
            Operation::Chat(payload) => {
                assert_eq!(payload.messages, messages);
                assert_eq!(payload.max_tokens, 1000);
                assert_eq!(payload.temperature, Some(0.7));
            }
            other => panic!("expected chat operation, got {other:?}"),
        }
    }

    #[test]
    fn test_single_text_prepends_system_preamble() {
        let operation = route(&single("Hello", Mode::Text));

        match operation {
            Operation::Chat(payload) => {
                assert_eq!(payload.messages.len(), 2);
                assert_eq!(payload.messages[0].role, Role::System);
                assert_eq!(payload.messages[0].content, prompts::CHAT_SYSTEM);
                assert_eq!(payload.messages[1].content, "Hello");
                assert_eq!(payload.max_tokens, 500);
                assert_eq!(payload.temperature, None);
            }
            other => panic!("expected chat operation, got {other:?}"),
        }
    }

    #[test]
    fn test_image_prompt_is_first_user_message() {
        let messages = vec![
            ChatMessage::new(Role::System, "be brief"),
            ChatMessage::new(Role::User, "a red fox"),
            ChatMessage::new(Role::User, "a blue fox"),
        ];
        let operation = route(&multi(messages, Mode::Image));
        assert_eq!(
            operation,
            Operation::Image {
                prompt: "a red fox".to_string()
            }
        );
    }

    #[test]
    fn test_image_prompt_empty_without_user_message() {
        let messages = vec![ChatMessage::new(Role::System, "be brief")];
        let operation = route(&multi(messages, Mode::Image));
        assert_eq!(
            operation,
            Operation::Image {
                prompt: String::new()
            }
        );
    }

    #[test]
    fn test_video_never_maps_to_an_upstream_call() {
        assert_eq!(route(&single("any", Mode::Video)), Operation::VideoPlaceholder);
        assert_eq!(
            route(&multi(vec![], Mode::Video)),
            Operation::VideoPlaceholder
        );
    }
}
