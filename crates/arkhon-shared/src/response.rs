//! Error response bodies.
//!
//! Every failure is rendered as `{"error": ...}` where the payload is either a
//! plain message or a single `{field: message}` pair for validation failures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Payload of the `error` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Message(String),
    Fields(BTreeMap<String, String>),
}

/// Standard error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub const BAD_BODY: &'static str = "Bad body format";
    pub const DUPLICATE_USER: &'static str = "An user with that username or email already exists.";
    pub const NO_USER: &'static str = "No user found with that username or email";
    pub const PASSWORD_MISMATCH: &'static str = "Password mismatch";
    pub const UNAUTHORIZED: &'static str = "Unauthorized";
    pub const INTERNAL: &'static str = "Internal server error. Please, try again later.";

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody::Message(message.into()),
        }
    }

    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody::Fields(BTreeMap::from([(field.into(), message.into())])),
        }
    }

    // Common error constructors
    pub fn bad_body() -> Self {
        Self::message(Self::BAD_BODY)
    }

    pub fn unauthorized() -> Self {
        Self::message(Self::UNAUTHORIZED)
    }

    pub fn internal_error() -> Self {
        Self::message(Self::INTERNAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_shape() {
        let body = serde_json::to_value(ErrorResponse::message("Password mismatch")).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Password mismatch" }));
    }

    #[test]
    fn test_field_shape() {
        let body = serde_json::to_value(ErrorResponse::field("username", "username is required"))
            .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": { "username": "username is required" } })
        );
    }
}
