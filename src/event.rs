//! Invocation contract types
//!
//! The hosting runtime hands each invocation an HTTP event plus an opaque
//! context and expects a `{statusCode, headers, body, isBase64Encoded}`
//! envelope back. Every envelope carries CORS headers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inbound HTTP event as delivered by the hosting runtime.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpEvent {
    pub http_method: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl Default for HttpEvent {
    fn default() -> Self {
        Self {
            http_method: "GET".to_string(),
            headers: BTreeMap::new(),
            body: None,
        }
    }
}

impl HttpEvent {
    pub fn post(body: impl Into<String>) -> Self {
        Self {
            http_method: "POST".to_string(),
            headers: BTreeMap::new(),
            body: Some(body.into()),
        }
    }

    pub fn method(method: impl Into<String>) -> Self {
        Self {
            http_method: method.into(),
            ..Self::default()
        }
    }
}

/// Opaque invocation context, used for observability only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestContext {
    pub request_id: String,
    pub function_name: String,
}

/// Uniform response envelope. Produced exactly once per invocation and
/// never mutated after construction.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

fn json_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ])
}

impl HttpResponse {
    /// A JSON envelope with the standard CORS and content-type headers.
    pub fn json<T: Serialize>(status_code: u16, body: &T) -> Self {
        let body = serde_json::to_string(body).expect("response body serializes to JSON");
        Self {
            status_code,
            headers: json_headers(),
            body,
            is_base64_encoded: false,
        }
    }

    /// CORS preflight reply: 200, empty body, method/header allowances.
    pub fn preflight() -> Self {
        let headers = BTreeMap::from([
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
            (
                "Access-Control-Allow-Methods".to_string(),
                "POST, OPTIONS".to_string(),
            ),
            (
                "Access-Control-Allow-Headers".to_string(),
                "Content-Type, X-User-Id".to_string(),
            ),
            ("Access-Control-Max-Age".to_string(), "86400".to_string()),
        ]);

        Self {
            status_code: 200,
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_defaults_to_get_with_no_body() {
        let event: HttpEvent = serde_json::from_str("{}").unwrap();
        assert_eq!(event.http_method, "GET");
        assert!(event.body.is_none());
    }

    #[test]
    fn test_event_deserializes_runtime_shape() {
        let event: HttpEvent = serde_json::from_value(json!({
            "httpMethod": "POST",
            "headers": {"Content-Type": "application/json"},
            "body": "{\"message\":\"hi\"}"
        }))
        .unwrap();

        assert_eq!(event.http_method, "POST");
        assert_eq!(event.body.as_deref(), Some("{\"message\":\"hi\"}"));
    }

    #[test]
    fn test_json_response_carries_cors_headers() {
        let response = HttpResponse::json(200, &json!({"ok": true}));
        assert_eq!(
            response.headers.get("Access-Control-Allow-Origin"),
            Some(&"*".to_string())
        );
        assert_eq!(
            response.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert!(!response.is_base64_encoded);
    }

    #[test]
    fn test_preflight_advertises_methods_and_max_age() {
        let response = HttpResponse::preflight();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "");
        assert_eq!(
            response.headers.get("Access-Control-Allow-Methods"),
            Some(&"POST, OPTIONS".to_string())
        );
        assert_eq!(
            response.headers.get("Access-Control-Max-Age"),
            Some(&"86400".to_string())
        );
    }

    #[test]
    fn test_envelope_serializes_camel_case() {
        let response = HttpResponse::json(405, &json!({"error": "Method not allowed"}));
        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(serialized["statusCode"], 405);
        assert_eq!(serialized["isBase64Encoded"], false);
    }
}
