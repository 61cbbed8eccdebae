use serde_json::{Map, Value};

use crate::domain::value::Sid;

/// Current state of a message as reported by `GET /messages/{sid}`.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDetails {
    pub sid: Sid,
    /// Delivery status, lowercased.
    pub status: Option<String>,
    /// The full response object, including the fields mapped above.
    pub fields: Map<String, Value>,
}

/// Current state of a call as reported by `GET /calls/{sid}` or `POST /calls/{sid}`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallDetails {
    pub sid: Sid,
    /// Call status, lowercased.
    pub status: Option<String>,
    /// Call duration exactly as the server rendered it.
    pub duration: Option<String>,
    /// The full response object, including the fields mapped above.
    pub fields: Map<String, Value>,
}
