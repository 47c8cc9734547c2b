//! The backend's `{data: ...}` / error-body conventions.

use serde::de::DeserializeOwned;
use serde_json::Value;
use storefront_core::CatalogError;

use crate::response::ApiResponse;

/// Where an endpoint puts the human-readable message in an error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageField {
    /// `{"message": "..."}`
    Message,
    /// `{"error": {"message": "..."}}`
    ErrorMessage,
}

impl MessageField {
    /// Pull the message out of a JSON body, if present and a string.
    pub fn extract<'a>(&self, body: &'a Value) -> Option<&'a str> {
        let value = match self {
            MessageField::Message => body.get("message"),
            MessageField::ErrorMessage => body.get("error").and_then(|e| e.get("message")),
        };
        value.and_then(Value::as_str).filter(|s| !s.is_empty())
    }
}

/// Turn a non-2xx response into an `Http` error.
///
/// The message comes from the body when it is JSON and carries one, else
/// the fallback is used.
pub fn http_error(resp: &ApiResponse, field: MessageField, fallback: &str) -> CatalogError {
    let message = resp
        .json_value()
        .as_ref()
        .and_then(|body| field.extract(body))
        .unwrap_or(fallback)
        .to_string();
    CatalogError::Http {
        status: resp.status.as_u16(),
        message,
    }
}

/// Parse a 2xx body as JSON.
pub fn success_body(resp: &ApiResponse) -> Result<Value, CatalogError> {
    resp.json()
}

/// The `data` member of a success body, required to satisfy `check`.
///
/// When `check` fails the error message is taken from the body via `field`,
/// falling back to `fallback`.
pub fn require_data<'a>(
    body: &'a Value,
    check: impl Fn(&Value) -> bool,
    field: MessageField,
    fallback: &str,
) -> Result<&'a Value, CatalogError> {
    match body.get("data") {
        Some(data) if check(data) => Ok(data),
        _ => Err(CatalogError::UnexpectedShape(
            field.extract(body).unwrap_or(fallback).to_string(),
        )),
    }
}

/// Deserialize a JSON value into a typed record.
pub fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, CatalogError> {
    T::deserialize(value).map_err(|e| CatalogError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use serde_json::json;
    use std::collections::HashMap;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse::new(
            StatusCode::from_u16(status).unwrap(),
            HashMap::new(),
            body.as_bytes().to_vec(),
        )
    }

    #[test]
    fn test_http_error_uses_body_message() {
        let err = http_error(
            &response(400, r#"{"message":"bad input"}"#),
            MessageField::Message,
            "fallback",
        );
        assert_eq!(err.to_string(), "bad input");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_http_error_falls_back_on_unparsable_body() {
        let err = http_error(&response(502, "Bad Gateway"), MessageField::Message, "fallback");
        assert_eq!(err.to_string(), "fallback");
    }

    #[test]
    fn test_http_error_falls_back_on_non_string_message() {
        let err = http_error(&response(500, r#"{"message": 12}"#), MessageField::Message, "fallback");
        assert_eq!(err.to_string(), "fallback");
    }

    #[test]
    fn test_nested_error_message() {
        let body = r#"{"error":{"message":"상품이 없습니다"},"message":"top"}"#;
        let err = http_error(&response(404, body), MessageField::ErrorMessage, "fallback");
        assert_eq!(err.to_string(), "상품이 없습니다");

        let err = http_error(&response(404, r#"{"message":"top"}"#), MessageField::ErrorMessage, "fallback");
        assert_eq!(err.to_string(), "fallback");
    }

    #[test]
    fn test_require_data() {
        let body = json!({"data": {"products": []}});
        assert!(require_data(&body, |d| d["products"].is_array(), MessageField::Message, "x").is_ok());

        let body = json!({"data": {"products": null}, "message": "empty"});
        let err = require_data(&body, |d| d["products"].is_array(), MessageField::Message, "x")
            .unwrap_err();
        assert_eq!(err.to_string(), "empty");

        let err = require_data(&json!({}), |_| true, MessageField::Message, "x").unwrap_err();
        assert!(matches!(err, CatalogError::UnexpectedShape(m) if m == "x"));
    }
}
