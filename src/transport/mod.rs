//! Transport layer: wire-format details (form encoding and JSON decoding).

mod call;
mod message;
mod scalar;

use serde_json::{Map, Value};

use crate::domain::Sid;

pub use call::{
    decode_call_details, encode_create_call_form, encode_merge_calls_form,
    encode_update_call_form,
};
pub use message::{decode_message_details, encode_create_message_form};

/// Decoded JSON object of a 2xx response.
pub type JsonObject = Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },

    #[error("response is missing required field `{field}`")]
    MissingField { field: &'static str },
}

/// 2xx response body, kept both as text and as the parsed JSON object.
///
/// The text is what the field decoders read, so numeric tokens keep their exact form.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    body: String,
    object: JsonObject,
}

impl JsonResponse {
    /// Parse a response body, which must be a JSON object.
    pub fn parse(body: String) -> Result<Self, DecodeError> {
        let object = parse_json_object(&body)?;
        Ok(Self { body, object })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn object(&self) -> &JsonObject {
        &self.object
    }

    pub fn into_object(self) -> JsonObject {
        self.object
    }
}

fn parse_json_object(body: &str) -> Result<JsonObject, DecodeError> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(object) => Ok(object),
        other => Err(DecodeError::NotAnObject {
            kind: value_kind(&other),
        }),
    }
}

/// Extract the server-assigned `sid`, exactly as sent.
///
/// Only a missing, non-string, or blank `sid` is rejected.
pub fn decode_created_sid(response: &JsonResponse) -> Result<Sid, DecodeError> {
    response
        .object
        .get(Sid::FIELD)
        .and_then(Value::as_str)
        .and_then(|value| Sid::verbatim(value).ok())
        .ok_or(DecodeError::MissingField { field: Sid::FIELD })
}

/// Human-readable message of an error body (`{"error": ...}` or `{"message": ...}`).
pub fn decode_error_message(body: &str) -> Option<String> {
    let object = parse_json_object(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::to_owned)
}

fn lowercase_status(status: Option<String>) -> Option<String> {
    status
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn push_param(params: &mut Vec<(String, String)>, key: &str, value: &str) {
    params.push((key.to_owned(), value.to_owned()));
}
