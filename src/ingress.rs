//! Ingress normalization
//!
//! Turns a raw HTTP event into a validated [`ChatRequest`] or a terminal
//! envelope (preflight, method-not-allowed). Two body shapes are accepted,
//! selected by sniffing for a `messages` key: the multi-message list form
//! and the bare single-message form.

use crate::error::Error;
use crate::event::{HttpEvent, HttpResponse};
use crate::models::{ChatMessage, ChatRequest, Mode, RequestVariant, Role};
use crate::Result;
use serde_json::{json, Value};

/// Result of normalizing an event: either a request to route, or an
/// envelope that ends the invocation without touching the upstream.
#[derive(Debug)]
pub enum IngressOutcome {
    Request(ChatRequest),
    Reply(HttpResponse),
}

/// Validate an inbound event.
///
/// Validation failures surface as [`Error::Validation`] naming the offending
/// field; the dispatcher maps them to 400 envelopes.
pub fn normalize(event: &HttpEvent) -> Result<IngressOutcome> {
    match event.http_method.as_str() {
        "OPTIONS" => return Ok(IngressOutcome::Reply(HttpResponse::preflight())),
        "POST" => {}
        _ => {
            return Ok(IngressOutcome::Reply(HttpResponse::json(
                405,
                &json!({"error": "Method not allowed"}),
            )))
        }
    }

    let raw = event.body.as_deref().unwrap_or("{}");
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| Error::validation("body", format!("malformed JSON ({e})")))?;

    let request = if value.get("messages").is_some() {
        validate_multi(&value)?
    } else {
        validate_single(&value)?
    };

    Ok(IngressOutcome::Request(request))
}

fn validate_multi(value: &Value) -> Result<ChatRequest> {
    let entries = value
        .get("messages")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::validation("messages", "must be an array"))?;

    let mut messages = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let role_str = entry
            .get("role")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::validation(format!("messages[{i}].role"), "must be a string"))?;
        let role: Role = role_str.parse().map_err(|_| {
            Error::validation(
                format!("messages[{i}].role"),
                "must be one of user, assistant, system",
            )
        })?;

        let content = entry
            .get("content")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::validation(format!("messages[{i}].content"), "must be a string")
            })?;
        if content.is_empty() {
            return Err(Error::validation(
                format!("messages[{i}].content"),
                "must be non-empty",
            ));
        }

        messages.push(ChatMessage::new(role, content));
    }

    let mode = value
        .get("mode")
        .ok_or_else(|| Error::validation("mode", "is required"))
        .and_then(parse_mode)?;

    Ok(ChatRequest {
        messages,
        mode,
        variant: RequestVariant::Multi,
    })
}

fn validate_single(value: &Value) -> Result<ChatRequest> {
    let message = value.get("message").and_then(Value::as_str).unwrap_or("");
    if message.is_empty() {
        return Err(Error::validation(
            "message",
            "required and must be a non-empty string",
        ));
    }

    // Mode is optional in the single-message form and defaults to text.
    let mode = match value.get("mode") {
        None => Mode::Text,
        Some(v) => parse_mode(v)?,
    };

    Ok(ChatRequest {
        messages: vec![ChatMessage::new(Role::User, message)],
        mode,
        variant: RequestVariant::Single,
    })
}

fn parse_mode(value: &Value) -> Result<Mode> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| Error::validation("mode", "must be one of text, image, video"))
}
