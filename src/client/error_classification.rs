//! Error classification logic

use crate::error::ApiError;
use crate::error_kind::ErrorKind;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    message: String,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    code: Option<serde_json::Value>,
}

/// Build a typed error from a failed response.
///
/// Uses the `{"error": {"message", "type", "code"}}` envelope when it decodes and
/// carries a message; otherwise the raw body becomes the message.
pub(crate) fn classify(status: u16, raw_body: &[u8]) -> ApiError {
    let kind = ErrorKind::from_http_status(status);

    match serde_json::from_slice::<ErrorEnvelope>(raw_body) {
        Ok(env) if !env.error.message.is_empty() => ApiError {
            kind,
            status,
            message: env.error.message,
            error_type: env.error.error_type.unwrap_or_default(),
            code: env.error.code.map(code_to_string).unwrap_or_default(),
        },
        _ => ApiError {
            kind,
            status,
            message: String::from_utf8_lossy(raw_body).into_owned(),
            error_type: String::new(),
            code: String::new(),
        },
    }
}

// The platform documents `code` as a string but some gateways send numbers.
fn code_to_string(v: serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
